#![allow(dead_code)]

use autotest::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    /// Watched dir and runner command are the two fields without usable
    /// defaults in tests, so they are required up front.
    pub fn new(dir: &str, command: &str) -> Self {
        let mut config = RawConfigFile::default();
        config.watch.dir = dir.to_string();
        config.runner.command = command.to_string();
        Self { config }
    }

    pub fn include(mut self, pattern: &str) -> Self {
        self.config.watch.include = vec![pattern.to_string()];
        self
    }

    pub fn add_include(mut self, pattern: &str) -> Self {
        self.config.watch.include.push(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn interval_seconds(mut self, seconds: u64) -> Self {
        self.config.watch.interval_seconds = seconds;
        self
    }

    pub fn sink(mut self, name: &str) -> Self {
        self.config.sink.sinks.push(name.to_string());
        self
    }

    pub fn sink_file_path(mut self, path: &str) -> Self {
        self.config.sink.file_path = path.to_string();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }
}
