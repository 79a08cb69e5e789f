//! Strategy exit status capture and propagation.

use std::process::{ExitCode, ExitStatus};

/// Exit code reported when a runner binary cannot be spawned, matching the
/// shell convention for a missing command.
const SPAWN_FAILURE_CODE: i32 = 127;

/// Base added to a signal number when a run ends by signal.
const SIGNAL_EXIT_BASE: i32 = 128;

/// The exit status a strategy produced, propagated verbatim as the
/// orchestrator's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome(i32);

impl RunOutcome {
    /// A successful run.
    #[must_use]
    pub const fn success() -> Self {
        Self(0)
    }

    /// A failed run with the given exit code.
    #[must_use]
    pub const fn failure(code: i32) -> Self {
        Self(code)
    }

    /// Capture a finished child's exit status.
    ///
    /// A child killed by signal `n` maps to `128 + n`. A status carrying
    /// neither an exit code nor a signal collapses to 1.
    #[must_use]
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self(SIGNAL_EXIT_BASE + signal);
            }
        }
        Self(1)
    }

    /// The orchestrator itself was interrupted by signal `signo`.
    #[must_use]
    pub const fn interrupted(signo: i32) -> Self {
        Self(SIGNAL_EXIT_BASE + signo)
    }

    /// The runner binary could not be spawned.
    #[must_use]
    pub const fn spawn_failure() -> Self {
        Self(SPAWN_FAILURE_CODE)
    }

    /// The raw exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Whether the run succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Convert to a process exit code. Codes outside the `u8` range
    /// collapse to the generic failure code.
    #[must_use]
    pub fn into_exit_code(self) -> ExitCode {
        u8::try_from(self.0).map_or(ExitCode::FAILURE, ExitCode::from)
    }
}
