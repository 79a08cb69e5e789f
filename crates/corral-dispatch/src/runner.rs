//! Test runner execution.
//!
//! Runner children inherit the orchestrator's stdio so their output streams
//! straight through. Each run races the child against the termination
//! channel: on a signal the child is killed and the interruption is folded
//! into the outcome rather than surfaced as an error, so the teardown path
//! stays uniform.

use corral_cluster::CallJournal;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::config::RunnerConfig;
use crate::error::DispatchResult;
use crate::modes::ModeSet;
use crate::outcome::RunOutcome;
use crate::signals::{next_signal, ShutdownRx};

/// The external test runners plus the native usage surface.
#[allow(async_fn_in_trait)]
pub trait RunnerSet: Send + Sync + 'static {
    /// Run the unit strategy with its fixed arguments.
    fn unit(
        &self,
        shutdown: &mut ShutdownRx,
    ) -> impl std::future::Future<Output = DispatchResult<RunOutcome>> + Send;

    /// Run the matrix strategy with `args` appended verbatim.
    fn matrix(
        &self,
        args: &[String],
        shutdown: &mut ShutdownRx,
    ) -> impl std::future::Future<Output = DispatchResult<RunOutcome>> + Send;

    /// Run the native integration strategy with the given modes.
    fn native(
        &self,
        modes: &ModeSet,
        shutdown: &mut ShutdownRx,
    ) -> impl std::future::Future<Output = DispatchResult<RunOutcome>> + Send;

    /// Print the native runner's usage text.
    fn native_usage(&self) -> impl std::future::Future<Output = DispatchResult<RunOutcome>> + Send;
}

/// Runner set that spawns the configured commands.
#[derive(Debug, Clone)]
pub struct CommandRunners {
    config: RunnerConfig,
}

impl CommandRunners {
    /// Create a runner set from validated configuration.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    fn unit_command(&self) -> Command {
        let mut cmd = Command::new(&self.config.unit.program);
        cmd.args(&self.config.unit.args);
        cmd
    }

    fn matrix_command(&self, extra: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.matrix.program);
        cmd.args(&self.config.matrix.args).args(extra);
        cmd
    }

    /// Fixed args, then mode flags, then the conf path as the trailing
    /// positional argument.
    fn native_command(&self, modes: &ModeSet) -> Command {
        let mut cmd = Command::new(&self.config.native.program);
        cmd.args(&self.config.native.args)
            .args(modes.flags())
            .arg(&self.config.native.conf);
        cmd
    }

    /// Usage invocation omits the conf path.
    fn usage_command(&self) -> Command {
        let mut cmd = Command::new(&self.config.native.program);
        cmd.args(&self.config.native.args).arg("--help");
        cmd
    }
}

impl RunnerSet for CommandRunners {
    async fn unit(&self, shutdown: &mut ShutdownRx) -> DispatchResult<RunOutcome> {
        info!(
            program = %self.config.unit.program,
            args = ?self.config.unit.args,
            "running unit tests"
        );
        run_supervised(self.unit_command(), shutdown).await
    }

    async fn matrix(
        &self,
        args: &[String],
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        info!(
            program = %self.config.matrix.program,
            args = ?args,
            "running test matrix"
        );
        run_supervised(self.matrix_command(args), shutdown).await
    }

    async fn native(
        &self,
        modes: &ModeSet,
        shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        info!(
            program = %self.config.native.program,
            modes = %modes,
            "running integration tests"
        );
        run_supervised(self.native_command(modes), shutdown).await
    }

    async fn native_usage(&self) -> DispatchResult<RunOutcome> {
        let mut cmd = self.usage_command();
        match cmd.status().await {
            Ok(status) => Ok(RunOutcome::from_status(status)),
            Err(e) => {
                error!(
                    program = %self.config.native.program,
                    error = %e,
                    "failed to run native runner usage"
                );
                Ok(RunOutcome::spawn_failure())
            }
        }
    }
}

/// Spawn the command and wait for it, racing the termination channel.
///
/// On interruption the child is killed before the interrupted outcome is
/// returned, so no runner outlives the orchestrator. A binary that cannot
/// be spawned yields the spawn-failure outcome rather than an error.
async fn run_supervised(mut cmd: Command, shutdown: &mut ShutdownRx) -> DispatchResult<RunOutcome> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(program = %program, error = %e, "failed to spawn runner");
            return Ok(RunOutcome::spawn_failure());
        }
    };

    tokio::select! {
        biased;

        signo = next_signal(shutdown) => {
            warn!(program = %program, signal = signo, "interrupted, stopping runner");
            if let Err(e) = child.kill().await {
                warn!(program = %program, error = %e, "failed to kill runner child");
            }
            Ok(RunOutcome::interrupted(signo))
        }
        status = child.wait() => Ok(RunOutcome::from_status(status?)),
    }
}

// ==================== Fake Implementation ====================

/// Scripted runner set for dispatch tests.
///
/// Records every call, with its rendered arguments, into a shared journal
/// and returns pre-arranged outcomes. The termination channel is ignored.
#[derive(Debug)]
pub struct FakeRunnerSet {
    journal: CallJournal,
    unit_outcome: RunOutcome,
    matrix_outcome: RunOutcome,
    native_outcome: RunOutcome,
    usage_outcome: RunOutcome,
}

impl FakeRunnerSet {
    /// Create a fake where every runner succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_journal(CallJournal::default())
    }

    /// Create a fake recording into an existing journal.
    #[must_use]
    pub fn with_journal(journal: CallJournal) -> Self {
        Self {
            journal,
            unit_outcome: RunOutcome::success(),
            matrix_outcome: RunOutcome::success(),
            native_outcome: RunOutcome::success(),
            usage_outcome: RunOutcome::success(),
        }
    }

    /// Script the unit runner's outcome.
    #[must_use]
    pub fn with_unit_outcome(mut self, outcome: RunOutcome) -> Self {
        self.unit_outcome = outcome;
        self
    }

    /// Script the matrix runner's outcome.
    #[must_use]
    pub fn with_matrix_outcome(mut self, outcome: RunOutcome) -> Self {
        self.matrix_outcome = outcome;
        self
    }

    /// Script the native runner's outcome.
    #[must_use]
    pub fn with_native_outcome(mut self, outcome: RunOutcome) -> Self {
        self.native_outcome = outcome;
        self
    }

    /// Script the usage invocation's outcome.
    #[must_use]
    pub fn with_usage_outcome(mut self, outcome: RunOutcome) -> Self {
        self.usage_outcome = outcome;
        self
    }

    /// The shared call journal.
    #[must_use]
    pub fn journal(&self) -> CallJournal {
        self.journal.clone()
    }

    async fn record(&self, name: &str, args: &[String]) {
        let entry = if args.is_empty() {
            name.to_string()
        } else {
            format!("{name} {}", args.join(" "))
        };
        self.journal.write().await.push(entry);
    }
}

impl Default for FakeRunnerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerSet for FakeRunnerSet {
    async fn unit(&self, _shutdown: &mut ShutdownRx) -> DispatchResult<RunOutcome> {
        self.record("runner.unit", &[]).await;
        Ok(self.unit_outcome)
    }

    async fn matrix(
        &self,
        args: &[String],
        _shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        self.record("runner.matrix", args).await;
        Ok(self.matrix_outcome)
    }

    async fn native(
        &self,
        modes: &ModeSet,
        _shutdown: &mut ShutdownRx,
    ) -> DispatchResult<RunOutcome> {
        self.record("runner.native", &modes.flags()).await;
        Ok(self.native_outcome)
    }

    async fn native_usage(&self) -> DispatchResult<RunOutcome> {
        self.record("runner.usage", &[]).await;
        Ok(self.usage_outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    // ==================== Command Shape Tests ====================

    #[test]
    fn test_unit_command_shape() {
        let runners = CommandRunners::new(RunnerConfig::default());
        let cmd = runners.unit_command();
        assert_eq!(cmd.as_std().get_program(), "pytest");
        assert_eq!(
            args_of(&cmd),
            ["--timeout", "600", "--ignore=tests/integration", "tests"]
        );
    }

    #[test]
    fn test_matrix_command_appends_passthrough_args() {
        let runners = CommandRunners::new(RunnerConfig::default());
        let cmd = runners.matrix_command(&strings(&["-e", "py312"]));
        assert_eq!(cmd.as_std().get_program(), "tox");
        assert_eq!(args_of(&cmd), ["-e", "py312"]);
    }

    #[test]
    fn test_native_command_orders_args_modes_conf() {
        let runners = CommandRunners::new(RunnerConfig::default());
        let modes = ModeSet::from_tokens(&strings(&["producer", "consumer"]));
        let cmd = runners.native_command(&modes);
        assert_eq!(cmd.as_std().get_program(), "python3");
        assert_eq!(
            args_of(&cmd),
            [
                "tests/integration/integration_test.py",
                "--producer",
                "--consumer",
                "tests/testconf.json"
            ]
        );
    }

    #[test]
    fn test_native_command_without_modes_keeps_conf_last() {
        let runners = CommandRunners::new(RunnerConfig::default());
        let cmd = runners.native_command(&ModeSet::default());
        assert_eq!(
            args_of(&cmd),
            ["tests/integration/integration_test.py", "tests/testconf.json"]
        );
    }

    #[test]
    fn test_usage_command_omits_conf() {
        let runners = CommandRunners::new(RunnerConfig::default());
        let cmd = runners.usage_command();
        assert_eq!(
            args_of(&cmd),
            ["tests/integration/integration_test.py", "--help"]
        );
    }

    // ==================== Supervision Tests ====================

    #[cfg(unix)]
    mod supervision {
        use super::*;

        fn shell(script: &str) -> Command {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", script]);
            cmd
        }

        #[tokio::test]
        async fn test_successful_child() {
            let (_tx, mut rx) = broadcast::channel(4);
            let outcome = run_supervised(shell("exit 0"), &mut rx).await.unwrap();
            assert!(outcome.is_success());
        }

        #[tokio::test]
        async fn test_child_exit_code_passes_through() {
            let (_tx, mut rx) = broadcast::channel(4);
            let outcome = run_supervised(shell("exit 7"), &mut rx).await.unwrap();
            assert_eq!(outcome.code(), 7);
        }

        #[tokio::test]
        async fn test_missing_binary_is_spawn_failure() {
            let (_tx, mut rx) = broadcast::channel(4);
            let mut cmd = Command::new("/nonexistent/corral-runner");
            cmd.arg("tests");
            let outcome = run_supervised(cmd, &mut rx).await.unwrap();
            assert_eq!(outcome.code(), 127);
        }

        #[tokio::test]
        async fn test_child_killed_by_signal_maps_to_convention() {
            let (_tx, mut rx) = broadcast::channel(4);
            let outcome = run_supervised(shell("kill -9 $$"), &mut rx).await.unwrap();
            assert_eq!(outcome.code(), 137);
        }

        #[tokio::test]
        async fn test_pending_signal_interrupts_and_kills_child() {
            let (tx, mut rx) = broadcast::channel(4);
            tx.send(crate::signals::SIGTERM).unwrap();

            let started = std::time::Instant::now();
            let outcome = run_supervised(shell("sleep 30"), &mut rx).await.unwrap();
            assert_eq!(outcome.code(), 143);
            assert!(started.elapsed().as_secs() < 10, "child must not run out its sleep");
        }

        #[tokio::test]
        async fn test_closed_channel_does_not_interrupt() {
            let (tx, mut rx) = broadcast::channel::<i32>(4);
            drop(tx);
            let outcome = run_supervised(shell("exit 0"), &mut rx).await.unwrap();
            assert!(outcome.is_success());
        }
    }

    // ==================== Fake Runner Tests ====================

    #[tokio::test]
    async fn test_fake_records_calls_in_order() {
        let fake = FakeRunnerSet::new();
        let journal = fake.journal();
        let (_tx, mut rx) = broadcast::channel(4);

        fake.unit(&mut rx).await.unwrap();
        fake.matrix(&strings(&["-e", "py312"]), &mut rx).await.unwrap();
        fake.native(&ModeSet::from_tokens(&strings(&["producer"])), &mut rx)
            .await
            .unwrap();
        fake.native_usage().await.unwrap();

        let entries = journal.read().await.clone();
        assert_eq!(
            entries,
            [
                "runner.unit",
                "runner.matrix -e py312",
                "runner.native --producer",
                "runner.usage"
            ]
        );
    }

    #[tokio::test]
    async fn test_fake_scripted_outcomes() {
        let fake = FakeRunnerSet::new()
            .with_unit_outcome(RunOutcome::failure(2))
            .with_native_outcome(RunOutcome::failure(5));
        let (_tx, mut rx) = broadcast::channel(4);

        assert_eq!(fake.unit(&mut rx).await.unwrap().code(), 2);
        assert_eq!(
            fake.native(&ModeSet::default(), &mut rx).await.unwrap().code(),
            5
        );
        assert!(fake.matrix(&[], &mut rx).await.unwrap().is_success());
    }
}
