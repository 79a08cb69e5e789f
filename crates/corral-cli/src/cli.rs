//! Command-line argument parsing with clap.

use clap::Parser;

/// corral - test harness orchestrator for ephemeral clusters.
#[derive(Parser, Debug, Clone)]
#[command(name = "corral")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Harness configuration file. The default location is used when the
    /// file exists; built-in defaults apply otherwise.
    #[arg(short, long, env = "CORRAL_CONFIG")]
    pub config: Option<String>,

    /// Compose binary override.
    #[arg(long, env = "CORRAL_COMPOSE_BIN")]
    pub compose_bin: Option<String>,

    /// Compose file override.
    #[arg(long, env = "CORRAL_COMPOSE_FILE")]
    pub compose_file: Option<String>,

    /// Strategy keyword and pass-through tokens.
    ///
    /// A first token of `help`, `unit`, `tox`, or `all` selects that
    /// strategy; anything else runs the native integration default with
    /// every token treated as a test mode.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
