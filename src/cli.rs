// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_config_path;

/// Command-line arguments for `autotest`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "autotest",
    version,
    about = "Watch a source tree and run a test command for each changed file.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Autotest.toml` in the current working directory. A missing
    /// file is not an error; CLI flags and built-in defaults apply instead.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Directory to watch for changes (overrides `[watch] dir`).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Comma-separated regexes for files to track (overrides `[watch] include`).
    ///
    /// Matched against the file's base name only.
    #[arg(long, value_name = "REGEX,..")]
    pub include: Option<String>,

    /// Comma-separated regexes for files to skip (overrides `[watch] exclude`).
    #[arg(long, value_name = "REGEX,..")]
    pub exclude: Option<String>,

    /// Seconds between change checks (overrides `[watch] interval_seconds`).
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Test command to run per changed file (overrides `[runner] command`).
    ///
    /// `{}` is replaced with the changed file's base name; without a
    /// placeholder the name is appended as the final argument.
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Extra result sinks by name, comma-separated (e.g. "stdout,file").
    #[arg(long, value_name = "NAME,..")]
    pub sink: Option<String>,

    /// Baseline, run a single check cycle, then exit (no polling loop).
    #[arg(long)]
    pub once: bool,

    /// Parse + validate, print the effective settings, but don't watch.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AUTOTEST_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
