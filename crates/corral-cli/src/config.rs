//! Harness configuration.
//!
//! One TOML file covers both halves of the harness: the `[cluster]` table
//! feeds `corral-cluster` and the `[runner]` tables feed `corral-dispatch`.
//! Every field has a default, so a missing file or an empty table is a
//! fully working configuration.

use std::path::Path;

use corral_cluster::ComposeConfig;
use corral_dispatch::RunnerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Default configuration file location, used when present.
pub const DEFAULT_CONFIG_PATH: &str = "corral.toml";

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Cluster lifecycle configuration.
    #[serde(default)]
    pub cluster: ComposeConfig,
    /// Runner command configuration.
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl HarnessConfig {
    /// Load configuration, resolving the file location.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// read when present and built-in defaults apply otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, if the default
    /// file exists but cannot be read, or if any file fails to parse or
    /// validate.
    pub fn load(explicit: Option<&str>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(content) => Self::from_toml(&content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
                Err(e) => Err(CliError::Io(e)),
            },
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CliError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> CliResult<()> {
        self.cluster.validate()?;
        self.runner.validate()?;
        Ok(())
    }

    /// Apply command-line compose overrides.
    pub fn apply_compose_overrides(
        &mut self,
        compose_bin: Option<&str>,
        compose_file: Option<&str>,
    ) {
        if let Some(binary) = compose_bin {
            self.cluster.binary = binary.to_string();
        }
        if let Some(file) = compose_file {
            self.cluster.file = file.to_string();
        }
    }
}
