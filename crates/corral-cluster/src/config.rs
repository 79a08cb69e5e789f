//! Compose backend configuration.
//!
//! Resolved once at process start and injected into the backend at
//! construction time; nothing in this crate reads the environment.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

/// Configuration for the compose-style orchestration backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Backend binary to invoke.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Compose file describing the cluster topology.
    #[serde(default = "default_file")]
    pub file: String,
    /// Arguments for bring-up. Readiness waiting is the backend's contract,
    /// hence the default `--wait`.
    #[serde(default = "default_up_args")]
    pub up_args: Vec<String>,
    /// Arguments for tear-down.
    #[serde(default = "default_down_args")]
    pub down_args: Vec<String>,
}

fn default_binary() -> String {
    "docker-compose".to_string()
}

fn default_file() -> String {
    "tests/docker/docker-compose.yaml".to_string()
}

fn default_up_args() -> Vec<String> {
    vec!["up".to_string(), "-d".to_string(), "--wait".to_string()]
}

fn default_down_args() -> Vec<String> {
    vec!["down".to_string()]
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            file: default_file(),
            up_args: default_up_args(),
            down_args: default_down_args(),
        }
    }
}

impl ComposeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.binary.is_empty() {
            return Err(ClusterError::Config(
                "cluster.binary cannot be empty".to_string(),
            ));
        }

        if self.file.is_empty() {
            return Err(ClusterError::Config(
                "cluster.file cannot be empty".to_string(),
            ));
        }

        if self.up_args.is_empty() {
            return Err(ClusterError::Config(
                "cluster.up_args cannot be empty".to_string(),
            ));
        }

        if self.down_args.is_empty() {
            return Err(ClusterError::Config(
                "cluster.down_args cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComposeConfig::default();
        assert_eq!(config.binary, "docker-compose");
        assert_eq!(config.file, "tests/docker/docker-compose.yaml");
        assert_eq!(config.up_args, vec!["up", "-d", "--wait"]);
        assert_eq!(config.down_args, vec!["down"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml = r#"
            binary = "podman-compose"
        "#;

        let config: ComposeConfig = toml::from_str(toml).expect("should parse");
        assert_eq!(config.binary, "podman-compose");
        assert_eq!(config.file, "tests/docker/docker-compose.yaml");
        assert_eq!(config.up_args, vec!["up", "-d", "--wait"]);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            binary = "docker"
            file = "ci/compose.yaml"
            up_args = ["compose", "up", "-d"]
            down_args = ["compose", "down", "-v"]
        "#;

        let config: ComposeConfig = toml::from_str(toml).expect("should parse");
        assert_eq!(config.binary, "docker");
        assert_eq!(config.file, "ci/compose.yaml");
        assert_eq!(config.up_args, vec!["compose", "up", "-d"]);
        assert_eq!(config.down_args, vec!["compose", "down", "-v"]);
    }

    #[test]
    fn test_empty_binary_rejected() {
        let config = ComposeConfig {
            binary: String::new(),
            ..ComposeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cluster.binary cannot be empty"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let config = ComposeConfig {
            file: String::new(),
            ..ComposeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cluster.file cannot be empty"));
    }

    #[test]
    fn test_empty_up_args_rejected() {
        let config = ComposeConfig {
            up_args: Vec::new(),
            ..ComposeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cluster.up_args cannot be empty"));
    }

    #[test]
    fn test_empty_down_args_rejected() {
        let config = ComposeConfig {
            down_args: Vec::new(),
            ..ComposeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cluster.down_args cannot be empty"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let original = ComposeConfig {
            binary: "docker".to_string(),
            file: "compose.yaml".to_string(),
            up_args: vec!["compose".to_string(), "up".to_string(), "-d".to_string()],
            down_args: vec!["compose".to_string(), "down".to_string()],
        };

        let toml_str = toml::to_string(&original).expect("should serialize");
        let parsed: ComposeConfig = toml::from_str(&toml_str).expect("should parse");

        assert_eq!(original, parsed);
    }
}
