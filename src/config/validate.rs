// src/config/validate.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AutotestError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AutotestError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.runner, raw.sink))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watched_dir(cfg)?;
    validate_interval(cfg)?;
    validate_include_patterns(cfg)?;
    validate_runner_command(cfg)?;
    Ok(())
}

fn validate_watched_dir(cfg: &RawConfigFile) -> Result<()> {
    let dir = Path::new(&cfg.watch.dir);
    if !dir.is_dir() {
        return Err(AutotestError::ConfigError(format!(
            "watched directory '{}' does not exist or is not a directory",
            cfg.watch.dir
        )));
    }
    Ok(())
}

fn validate_interval(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.interval_seconds == 0 {
        return Err(AutotestError::ConfigError(
            "[watch].interval_seconds must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// An empty include list would silently disable the daemon: with no accept
/// patterns, no file is ever tracked (fail closed). Reject it up front.
fn validate_include_patterns(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.include.is_empty() {
        return Err(AutotestError::ConfigError(
            "[watch].include must contain at least one pattern; \
             an empty include list tracks no files"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_runner_command(cfg: &RawConfigFile) -> Result<()> {
    if cfg.runner.command.trim().is_empty() {
        return Err(AutotestError::ConfigError(
            "[runner].command must be set (the test command to run per changed file)".to_string(),
        ));
    }
    Ok(())
}
