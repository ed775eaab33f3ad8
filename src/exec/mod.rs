// src/exec/mod.rs

//! Test-invocation pipeline.
//!
//! This module runs the external test command for one changed file at a
//! time, using `tokio::process::Command`, and classifies the result:
//!
//! - [`runner`] owns process spawning, output capture and exit-code
//!   classification.
//! - [`backend`] provides the `InvocationBackend` trait and the concrete
//!   `CommandBackend` that the daemon uses in production, and which tests
//!   can replace with a fake implementation.

pub mod backend;
pub mod runner;

pub use backend::{CommandBackend, InvocationBackend};
pub use runner::TestRunner;

use std::path::PathBuf;

/// Result of running the test command for one changed file.
///
/// Created fresh per invocation, handed to every sink, then dropped;
/// outcomes are never retained.
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    /// The changed file the invocation was for.
    pub file: PathBuf,
    /// Exit code 0 means passed; anything else (including a failure to
    /// launch the command at all) means failed.
    pub passed: bool,
    /// Full captured text of the invocation: stdout, then stderr.
    pub output: String,
}
