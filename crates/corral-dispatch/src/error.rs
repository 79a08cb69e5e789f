//! Error types for strategy dispatch.

use thiserror::Error;

/// Result alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors that can occur while dispatching a test strategy.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Cluster lifecycle error.
    #[error("cluster error: {0}")]
    Cluster(#[from] corral_cluster::ClusterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display Tests ====================

    #[test]
    fn test_config_error_display() {
        let err = DispatchError::Config("runner.unit.program cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: runner.unit.program cannot be empty"
        );
    }

    #[test]
    fn test_cluster_error_display() {
        let err = DispatchError::from(corral_cluster::ClusterError::Provision(
            "compose exited with status 1".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "cluster error: cluster provisioning failed: compose exited with status 1"
        );
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: DispatchError = io_err.into();
        assert!(matches!(err, DispatchError::Io(_)));
    }

    #[test]
    fn test_cluster_error_conversion() {
        let cluster_err = corral_cluster::ClusterError::Teardown("boom".to_string());
        let err: DispatchError = cluster_err.into();
        assert!(matches!(err, DispatchError::Cluster(_)));
    }
}
