//! Strategy dispatch with guaranteed teardown.

use std::sync::Arc;

use corral_cluster::{ClusterBackend, ClusterController};
use tracing::{info, warn};

use crate::error::DispatchResult;
use crate::guard::CleanupGuard;
use crate::invocation::{Invocation, Strategy};
use crate::modes::ModeSet;
use crate::outcome::RunOutcome;
use crate::runner::RunnerSet;
use crate::signals::{next_signal, ShutdownRx};

/// Selects a strategy from the invocation, runs it, and fires the teardown
/// guard before the result is surfaced.
///
/// Cluster-backed strategies request provisioning through the controller,
/// which marks the cluster requested before the backend is asked to come
/// up. The guard therefore tears down even when provisioning itself failed
/// or was interrupted midway.
pub struct Dispatcher<B: ClusterBackend, R: RunnerSet> {
    controller: Arc<ClusterController<B>>,
    runners: R,
    guard: CleanupGuard<B>,
}

impl<B: ClusterBackend, R: RunnerSet> Dispatcher<B, R> {
    /// Create a dispatcher. The guard is installed before anything runs.
    #[must_use]
    pub fn new(controller: Arc<ClusterController<B>>, runners: R) -> Self {
        let guard = CleanupGuard::install(Arc::clone(&controller));
        Self {
            controller,
            runners,
            guard,
        }
    }

    /// Run one invocation to completion.
    ///
    /// The guard fires after the strategy settles on every path: normal
    /// completion, internal error, and signal interruption. An error
    /// propagates only after the guard has fired, so the caller may exit
    /// on it directly.
    pub async fn run(
        &self,
        invocation: &Invocation,
        mut shutdown: ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        let (strategy, rest) = invocation.select();
        info!(strategy = %strategy, tokens = ?rest, "dispatching");

        let result = self.execute(strategy, rest, &mut shutdown).await;
        self.guard.fire().await;

        if let Ok(outcome) = &result {
            info!(code = outcome.code(), "run complete");
        }
        result
    }

    async fn execute(
        &self,
        strategy: Strategy,
        rest: &[String],
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        match strategy {
            Strategy::Help => self.run_help().await,
            Strategy::Unit => self.runners.unit(shutdown).await,
            Strategy::Matrix => self.run_matrix(rest, shutdown).await,
            Strategy::Combined => self.run_combined(rest, shutdown).await,
            Strategy::Native => self.run_native(rest, shutdown).await,
        }
    }

    /// Help never touches the cluster and always reports failure, so a
    /// scripted caller cannot mistake it for a passing run.
    async fn run_help(&self) -> DispatchResult<RunOutcome> {
        if let Err(e) = self.runners.native_usage().await {
            warn!(error = %e, "failed to print native runner usage");
        }
        Ok(RunOutcome::failure(1))
    }

    async fn run_matrix(
        &self,
        args: &[String],
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        if let Some(interrupted) = self.provision(shutdown).await? {
            return Ok(interrupted);
        }
        self.runners.matrix(args, shutdown).await
    }

    async fn run_combined(
        &self,
        rest: &[String],
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        let unit = self.runners.unit(shutdown).await?;
        if !unit.is_success() {
            info!(code = unit.code(), "unit phase failed, skipping integration phase");
            return Ok(unit);
        }
        self.run_native(rest, shutdown).await
    }

    async fn run_native(
        &self,
        tokens: &[String],
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        if let Some(interrupted) = self.provision(shutdown).await? {
            return Ok(interrupted);
        }
        let modes = ModeSet::from_tokens(tokens);
        self.runners.native(&modes, shutdown).await
    }

    /// Bring the cluster up, racing the wait against termination signals.
    ///
    /// Returns the interrupted outcome when a signal wins the race. The
    /// signal branch is polled first so a signal that arrived before
    /// provisioning starts prevents the request entirely.
    async fn provision(&self, shutdown: &mut ShutdownRx) -> DispatchResult<Option<RunOutcome>> {
        tokio::select! {
            biased;

            signo = next_signal(shutdown) => {
                warn!(signal = signo, "interrupted while provisioning cluster");
                Ok(Some(RunOutcome::interrupted(signo)))
            }
            res = self.controller.bring_up() => {
                res?;
                Ok(None)
            }
        }
    }
}
