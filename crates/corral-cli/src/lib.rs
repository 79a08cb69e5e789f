//! # corral-cli
//!
//! The `corral` binary: a test harness orchestrator that provisions an
//! ephemeral compose-managed cluster, dispatches one test strategy per
//! invocation, and guarantees the cluster comes back down before the
//! process exits.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   invocation    ┌─────────────────┐   up / down   ┌─────────────────┐
//! │ corral-cli │────────────────►│ corral-dispatch │──────────────►│ corral-cluster  │
//! └────────────┘                 └─────────────────┘               └─────────────────┘
//!                                        │ spawn
//!                                        ▼
//!                                 test runner children
//! ```
//!
//! The binary's own exit code is the selected strategy's exit code,
//! verbatim. Interruptions exit `128 + signo` and a runner that cannot be
//! spawned exits 127.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::HarnessConfig;
pub use error::{CliError, CliResult};
