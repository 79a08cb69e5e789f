//! Exactly-once teardown trigger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use corral_cluster::{ClusterBackend, ClusterController};
use tracing::{debug, warn};

/// Fires the cluster teardown exactly once per run.
///
/// The dispatcher fires the guard after the strategy settles, on every
/// path: normal completion, error, and signal interruption. A teardown
/// failure is logged and swallowed so it can never mask the strategy's own
/// exit status. The controller keeps the guard honest when the cluster was
/// never requested: firing is then inert.
pub struct CleanupGuard<B: ClusterBackend> {
    controller: Arc<ClusterController<B>>,
    fired: AtomicBool,
}

impl<B: ClusterBackend> CleanupGuard<B> {
    /// Install a guard over the controller.
    #[must_use]
    pub fn install(controller: Arc<ClusterController<B>>) -> Self {
        Self {
            controller,
            fired: AtomicBool::new(false),
        }
    }

    /// Whether the guard has fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Run the teardown if it has not run yet. Idempotent.
    pub async fn fire(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            debug!("cleanup guard already fired");
            return;
        }
        if let Err(e) = self.controller.tear_down().await {
            warn!(error = %e, "cluster teardown failed");
        }
    }
}

impl<B: ClusterBackend> Drop for CleanupGuard<B> {
    fn drop(&mut self) {
        // Teardown is async and cannot run here. A drop before firing
        // means a dispatch path returned without settling, which the
        // dispatcher is structured to prevent.
        if !self.fired.load(Ordering::SeqCst) {
            warn!("cleanup guard dropped without firing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_cluster::FakeBackend;

    fn guarded(
        backend: FakeBackend,
    ) -> (CleanupGuard<FakeBackend>, Arc<ClusterController<FakeBackend>>) {
        let controller = Arc::new(ClusterController::new(backend));
        let guard = CleanupGuard::install(Arc::clone(&controller));
        (guard, controller)
    }

    // ==================== Firing Tests ====================

    #[tokio::test]
    async fn test_fire_tears_down_requested_cluster() {
        let backend = FakeBackend::new();
        let journal = backend.journal();
        let (guard, controller) = guarded(backend);

        controller.bring_up().await.unwrap();
        guard.fire().await;

        assert!(guard.has_fired());
        let entries = journal.read().await.clone();
        assert_eq!(entries, ["cluster.up", "cluster.down"]);
    }

    #[tokio::test]
    async fn test_fire_is_idempotent() {
        let backend = FakeBackend::new();
        let journal = backend.journal();
        let (guard, controller) = guarded(backend);

        controller.bring_up().await.unwrap();
        guard.fire().await;
        guard.fire().await;
        guard.fire().await;

        let entries = journal.read().await.clone();
        assert_eq!(entries, ["cluster.up", "cluster.down"]);
    }

    #[tokio::test]
    async fn test_fire_without_request_is_inert() {
        let backend = FakeBackend::new();
        let journal = backend.journal();
        let (guard, _controller) = guarded(backend);

        guard.fire().await;

        assert!(guard.has_fired());
        assert!(journal.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_teardown_failure_is_swallowed() {
        let backend = FakeBackend::new().with_down_failure();
        let journal = backend.journal();
        let (guard, controller) = guarded(backend);

        controller.bring_up().await.unwrap();
        guard.fire().await;

        assert!(guard.has_fired());
        let entries = journal.read().await.clone();
        assert_eq!(entries, ["cluster.up", "cluster.down"]);
    }

    #[tokio::test]
    async fn test_fire_after_failed_bring_up_still_tears_down() {
        let backend = FakeBackend::new().with_up_failure();
        let journal = backend.journal();
        let (guard, controller) = guarded(backend);

        assert!(controller.bring_up().await.is_err());
        guard.fire().await;

        let entries = journal.read().await.clone();
        assert_eq!(entries, ["cluster.up", "cluster.down"]);
    }
}
