//! Cluster orchestration backends.
//!
//! The harness never talks to a container daemon directly; it shells out to
//! a compose-style binary and lets that tool own service topology and
//! readiness. [`ComposeBackend`] is the production implementation,
//! [`FakeBackend`] the journaling test double.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::process::Command;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ComposeConfig;
use crate::error::{ClusterError, ClusterResult};

/// Shared journal of calls recorded by fakes, in invocation order.
///
/// Handing the same journal to several fakes lets a test assert ordering
/// across components, not just per-component counts.
pub type CallJournal = Arc<RwLock<Vec<String>>>;

/// Cluster orchestration backend.
///
/// Implementations own the readiness contract: `up` must not resolve until
/// the cluster accepts connections from the strategy that requested it.
#[allow(async_fn_in_trait)]
pub trait ClusterBackend: Send + Sync + 'static {
    /// Provision the cluster and wait until it is ready.
    fn up(&self) -> impl std::future::Future<Output = ClusterResult<()>> + Send;

    /// Stop and remove the cluster.
    fn down(&self) -> impl std::future::Future<Output = ClusterResult<()>> + Send;
}

/// Backend shelling out to a compose-style binary.
#[derive(Debug, Clone)]
pub struct ComposeBackend {
    config: ComposeConfig,
}

impl ComposeBackend {
    /// Create a backend over the given configuration.
    #[must_use]
    pub fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("-f").arg(&self.config.file);
        cmd.args(args);
        cmd
    }
}

impl ClusterBackend for ComposeBackend {
    async fn up(&self) -> ClusterResult<()> {
        info!(
            binary = %self.config.binary,
            file = %self.config.file,
            "bringing cluster up"
        );

        let output = self
            .command(&self.config.up_args)
            .output()
            .await
            .map_err(|e| {
                ClusterError::Provision(format!("failed to invoke {}: {e}", self.config.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ClusterError::Provision(format!(
                "{} exited with {}: {}",
                self.config.binary,
                output.status,
                stderr.trim()
            )));
        }

        info!("cluster is up");
        Ok(())
    }

    async fn down(&self) -> ClusterResult<()> {
        info!(
            binary = %self.config.binary,
            file = %self.config.file,
            "tearing cluster down"
        );

        let output = self
            .command(&self.config.down_args)
            .output()
            .await
            .map_err(|e| {
                ClusterError::Teardown(format!("failed to invoke {}: {e}", self.config.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ClusterError::Teardown(format!(
                "{} exited with {}: {}",
                self.config.binary,
                output.status,
                stderr.trim()
            )));
        }

        debug!("cluster is down");
        Ok(())
    }
}

/// In-memory fake backend for testing.
///
/// Records every `up`/`down` call into its journal and can be armed to fail
/// either operation. Calls are recorded before the failure is injected, so
/// ordering assertions hold on failure paths too.
#[derive(Debug, Default)]
pub struct FakeBackend {
    journal: CallJournal,
    fail_up: AtomicBool,
    fail_down: AtomicBool,
}

impl FakeBackend {
    /// Create a new fake backend with its own journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake backend recording into a shared journal.
    #[must_use]
    pub fn with_journal(journal: CallJournal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    /// Arm `up` to fail.
    #[must_use]
    pub fn with_up_failure(self) -> Self {
        self.fail_up.store(true, Ordering::SeqCst);
        self
    }

    /// Arm `down` to fail.
    #[must_use]
    pub fn with_down_failure(self) -> Self {
        self.fail_down.store(true, Ordering::SeqCst);
        self
    }

    /// The call journal, shared with any clone holders.
    #[must_use]
    pub fn journal(&self) -> CallJournal {
        self.journal.clone()
    }

    /// Number of recorded `up` calls.
    pub async fn up_count(&self) -> usize {
        self.count("cluster.up").await
    }

    /// Number of recorded `down` calls.
    pub async fn down_count(&self) -> usize {
        self.count("cluster.down").await
    }

    async fn count(&self, call: &str) -> usize {
        self.journal.read().await.iter().filter(|c| *c == call).count()
    }

    async fn record(&self, call: &str) {
        self.journal.write().await.push(call.to_string());
    }
}

impl ClusterBackend for FakeBackend {
    async fn up(&self) -> ClusterResult<()> {
        self.record("cluster.up").await;
        if self.fail_up.load(Ordering::SeqCst) {
            return Err(ClusterError::Provision("injected up failure".to_string()));
        }
        Ok(())
    }

    async fn down(&self) -> ClusterResult<()> {
        self.record("cluster.down").await;
        if self.fail_down.load(Ordering::SeqCst) {
            return Err(ClusterError::Teardown("injected down failure".to_string()));
        }
        Ok(())
    }
}
