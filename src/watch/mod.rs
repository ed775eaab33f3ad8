// src/watch/mod.rs

//! Change-detection engine.
//!
//! This module owns the poll-and-diff pipeline:
//! - [`patterns`] decides which files are tracked (include/exclude regexes
//!   matched against base names).
//! - [`snapshot`] holds the (name, mtime) fingerprints and the set diff.
//! - [`detector`] walks the watched tree, takes snapshots, and reports the
//!   changed files of a check as a [`snapshot::ChangeEvent`].
//!
//! Detection is deliberately poll-based: there is no OS-level event
//! notification anywhere in this crate.

pub mod detector;
pub mod patterns;
pub mod snapshot;

pub use detector::ChangeDetector;
pub use patterns::PatternSet;
pub use snapshot::{ChangeEvent, Snapshot, SnapshotSet};
