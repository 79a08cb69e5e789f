//! Error types for cluster orchestration.

use thiserror::Error;

/// Result type alias for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that can occur while managing the cluster.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Cluster provisioning failed.
    #[error("cluster provisioning failed: {0}")]
    Provision(String),

    /// Cluster teardown failed.
    #[error("cluster teardown failed: {0}")]
    Teardown(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
