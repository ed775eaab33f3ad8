// src/engine/mod.rs

//! The daemon loop.
//!
//! A single logical control path drives the cycle:
//! sleep(interval) → check → per changed file: invoke → fan out.
//!
//! The snapshot state is only ever touched from this path; the only
//! blocking operation of consequence is the external test command, and
//! shutdown is re-checked between invocations so a Ctrl-C never has to
//! abort an in-flight run abnormally.

pub mod runtime;

pub use runtime::Daemon;

/// Options for the daemon loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaemonOptions {
    /// If true, run the baseline plus exactly one check cycle, then exit
    /// (used for `--once`).
    pub once: bool,
}
