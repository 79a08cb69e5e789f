//! Cluster lifecycle controller.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::backend::ClusterBackend;
use crate::error::ClusterResult;

/// Brackets cluster bring-up and tear-down around a test run.
///
/// The controller tracks a single bit: whether a cluster was requested. The
/// bit is set before the backend `up` starts, so a bring-up that fails or is
/// interrupted still gets a tear-down. `tear_down` consumes the bit with a
/// swap, which makes repeated calls inert and holds the backend `down` to at
/// most one invocation per run.
pub struct ClusterController<B: ClusterBackend> {
    backend: B,
    requested: AtomicBool,
}

impl<B: ClusterBackend> ClusterController<B> {
    /// Create a controller over the given backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            requested: AtomicBool::new(false),
        }
    }

    /// Whether a cluster has been requested and not yet torn down.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Provision the cluster and wait until it is ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails. The requested bit stays set,
    /// so a later `tear_down` still runs the backend `down`.
    pub async fn bring_up(&self) -> ClusterResult<()> {
        self.requested.store(true, Ordering::SeqCst);
        self.backend.up().await
    }

    /// Tear the cluster down if one was requested.
    ///
    /// Inert when no cluster was requested or when teardown already ran.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend `down` fails.
    pub async fn tear_down(&self) -> ClusterResult<()> {
        if !self.requested.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        info!("tearing down requested cluster");
        self.backend.down().await
    }
}
