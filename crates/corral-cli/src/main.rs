//! corral binary entrypoint.
//!
//! Wires the harness together: configuration, signal trapping, the compose
//! cluster controller, the command runners, and the dispatcher. The process
//! exit code is the dispatched strategy's exit code, verbatim.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use corral_cli::cli::Cli;
use corral_cli::config::HarnessConfig;
use corral_cluster::{ClusterController, ComposeBackend};
use corral_dispatch::signals;
use corral_dispatch::{CommandRunners, Dispatcher, Invocation, RunOutcome};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(outcome) => outcome.into_exit_code(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let mut config = HarnessConfig::load(cli.config.as_deref())
        .context("failed to load harness configuration")?;
    config.apply_compose_overrides(cli.compose_bin.as_deref(), cli.compose_file.as_deref());
    config.validate().context("invalid harness configuration")?;

    // Trap termination signals before anything can be provisioned.
    let shutdown = signals::install().context("failed to install signal handlers")?;

    let controller = Arc::new(ClusterController::new(ComposeBackend::new(config.cluster)));
    let runners = CommandRunners::new(config.runner);
    let dispatcher = Dispatcher::new(controller, runners);

    let invocation = Invocation::new(cli.tokens);
    let outcome = dispatcher.run(&invocation, shutdown).await?;
    Ok(outcome)
}
