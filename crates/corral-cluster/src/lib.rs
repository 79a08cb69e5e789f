//! # corral-cluster
//!
//! Ephemeral cluster lifecycle for the corral test harness.
//!
//! The test strategies in `corral-dispatch` run against a short-lived
//! multi-service cluster managed by an external compose-style tool. This
//! crate wraps that tool behind the [`ClusterBackend`] trait and brackets
//! its `up`/`down` operations with [`ClusterController`], which tracks the
//! single piece of state the harness cares about: whether a cluster was
//! requested for this run.
//!
//! The controller's contract is what makes teardown safe to wire into a
//! termination path: `tear_down` is inert when nothing was requested, runs
//! the backend `down` at most once, and stays armed even when bring-up
//! fails partway through.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;

pub use backend::{CallJournal, ClusterBackend, ComposeBackend, FakeBackend};
pub use config::ComposeConfig;
pub use controller::ClusterController;
pub use error::{ClusterError, ClusterResult};
