// src/config/mod.rs

//! Configuration loading, modelling and validation.
//!
//! Settings come from an optional TOML file (`Autotest.toml` by default)
//! with CLI flags taking precedence over file values. Validation happens
//! once, up front: a daemon with a bad watched directory or an empty
//! include list must never enter the run state.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, RawConfigFile, RunnerSection, SinkSection, WatchSection};
