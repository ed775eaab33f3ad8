// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (watched directory, interval, etc.). Use [`load_and_validate`]
/// for that.
///
/// A missing file is not an error: the daemon can be configured entirely
/// from CLI flags, so defaults are returned instead.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "no config file found; using defaults");
        return Ok(RawConfigFile::default());
    }
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, apply CLI overrides, and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML (if the file exists).
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Lets CLI flags override file values.
/// - Checks for:
///   - watched directory existing and being a directory,
///   - a non-zero poll interval,
///   - a non-empty runner command,
///   - a non-empty include list.
pub fn load_and_validate(path: impl AsRef<Path>, args: &CliArgs) -> Result<ConfigFile> {
    let mut raw = load_from_path(&path)?;
    apply_cli_overrides(&mut raw, args);
    let config = ConfigFile::try_from(raw)?;
    Ok(config)
}

/// Fold CLI flags into the raw config; flags win over file values.
///
/// `--include`/`--exclude`/`--sink` are comma-separated lists on the CLI.
fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(ref dir) = args.dir {
        raw.watch.dir = dir.clone();
    }
    if let Some(ref include) = args.include {
        raw.watch.include = split_comma_list(include);
    }
    if let Some(ref exclude) = args.exclude {
        raw.watch.exclude = split_comma_list(exclude);
    }
    if let Some(interval) = args.interval {
        raw.watch.interval_seconds = interval;
    }
    if let Some(ref command) = args.command {
        raw.runner.command = command.clone();
    }
    if let Some(ref sinks) = args.sink {
        raw.sink.sinks = split_comma_list(sinks);
    }
}

fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Autotest.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `AUTOTEST_CONFIG`).
/// - Look for multiple default locations.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Autotest.toml")
}
