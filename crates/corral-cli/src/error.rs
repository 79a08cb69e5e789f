//! CLI error types.

use thiserror::Error;

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Cluster lifecycle error.
    #[error("cluster error: {0}")]
    Cluster(#[from] corral_cluster::ClusterError),

    /// Dispatch error.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] corral_dispatch::DispatchError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
