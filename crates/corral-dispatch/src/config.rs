//! Test runner configuration.
//!
//! Three runner commands, one per external strategy. Defaults target the
//! conventional python toolchain layout; every field can be overridden from
//! the harness configuration file.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

fn default_unit_program() -> String {
    "pytest".to_string()
}

fn default_unit_args() -> Vec<String> {
    vec![
        "--timeout".to_string(),
        "600".to_string(),
        "--ignore=tests/integration".to_string(),
        "tests".to_string(),
    ]
}

fn default_matrix_program() -> String {
    "tox".to_string()
}

fn default_native_program() -> String {
    "python3".to_string()
}

fn default_native_args() -> Vec<String> {
    vec!["tests/integration/integration_test.py".to_string()]
}

fn default_native_conf() -> String {
    "tests/testconf.json".to_string()
}

/// Unit test runner command.
///
/// Invocation tokens are never appended here: the unit runner always runs
/// with its fixed arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRunnerConfig {
    /// Runner binary.
    #[serde(default = "default_unit_program")]
    pub program: String,
    /// Fixed arguments.
    #[serde(default = "default_unit_args")]
    pub args: Vec<String>,
}

impl Default for UnitRunnerConfig {
    fn default() -> Self {
        Self {
            program: default_unit_program(),
            args: default_unit_args(),
        }
    }
}

/// Matrix runner command. Invocation tokens are appended verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixRunnerConfig {
    /// Runner binary.
    #[serde(default = "default_matrix_program")]
    pub program: String,
    /// Fixed arguments, placed before any pass-through arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for MatrixRunnerConfig {
    fn default() -> Self {
        Self {
            program: default_matrix_program(),
            args: Vec::new(),
        }
    }
}

/// Native integration runner command.
///
/// The full argument order is fixed args, then one flag per requested mode,
/// then the configuration file path as the final positional argument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeRunnerConfig {
    /// Runner binary.
    #[serde(default = "default_native_program")]
    pub program: String,
    /// Fixed arguments.
    #[serde(default = "default_native_args")]
    pub args: Vec<String>,
    /// Runner configuration file, passed as the trailing argument.
    #[serde(default = "default_native_conf")]
    pub conf: String,
}

impl Default for NativeRunnerConfig {
    fn default() -> Self {
        Self {
            program: default_native_program(),
            args: default_native_args(),
            conf: default_native_conf(),
        }
    }
}

/// Runner commands for the three external strategies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Unit runner.
    #[serde(default)]
    pub unit: UnitRunnerConfig,
    /// Matrix runner.
    #[serde(default)]
    pub matrix: MatrixRunnerConfig,
    /// Native integration runner.
    #[serde(default)]
    pub native: NativeRunnerConfig,
}

impl RunnerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any runner binary or the native conf path is
    /// empty.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.unit.program.is_empty() {
            return Err(DispatchError::Config(
                "runner.unit.program cannot be empty".to_string(),
            ));
        }
        if self.matrix.program.is_empty() {
            return Err(DispatchError::Config(
                "runner.matrix.program cannot be empty".to_string(),
            ));
        }
        if self.native.program.is_empty() {
            return Err(DispatchError::Config(
                "runner.native.program cannot be empty".to_string(),
            ));
        }
        if self.native.conf.is_empty() {
            return Err(DispatchError::Config(
                "runner.native.conf cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
