//! # corral-dispatch
//!
//! Strategy selection and dispatch for the corral test harness.
//!
//! An invocation's first token picks one of a closed set of strategies:
//! `help`, `unit`, `tox`, `all`, or the native integration default for
//! anything else. The [`Dispatcher`] runs the selected strategy and owns
//! the lifecycle promise the whole harness is built around: once a cluster
//! has been requested, its teardown fires exactly once before the process
//! reports any outcome, whether the strategy passed, failed, blew up, or
//! was interrupted by a termination signal.
//!
//! Strategy exit codes propagate verbatim. Interruptions map to the shell
//! convention of `128 + signo`, and a runner binary that cannot be spawned
//! reports 127.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod guard;
pub mod invocation;
pub mod modes;
pub mod outcome;
pub mod runner;
pub mod signals;

pub use config::{MatrixRunnerConfig, NativeRunnerConfig, RunnerConfig, UnitRunnerConfig};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use guard::CleanupGuard;
pub use invocation::{Invocation, Strategy};
pub use modes::ModeSet;
pub use outcome::RunOutcome;
pub use runner::{CommandRunners, FakeRunnerSet, RunnerSet};
pub use signals::{ShutdownRx, ShutdownTx};
