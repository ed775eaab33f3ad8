// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// dir = "src"
/// include = [".*Test\\.java"]
/// exclude = [".*IgnoreTest\\.java"]
/// interval_seconds = 2
///
/// [runner]
/// command = "mvn test -Dtest={}"
///
/// [sink]
/// sinks = ["stdout"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Watched-tree settings from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// Test-command settings from `[runner]`.
    #[serde(default)]
    pub runner: RunnerSection,

    /// Result-sink settings from `[sink]`.
    #[serde(default)]
    pub sink: SinkSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Root directory that is recursively walked for changes.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Regexes a file's base name must match (at least one) to be tracked.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Regexes that reject a file even when an include pattern matches.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Seconds to sleep between change checks.
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_include() -> Vec<String> {
    vec![r".*Test\.java".to_string()]
}

fn default_interval_seconds() -> u64 {
    2
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            include: default_include(),
            exclude: Vec::new(),
            interval_seconds: default_interval_seconds(),
        }
    }
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunnerSection {
    /// The external test command, run once per changed file.
    ///
    /// `{}` is replaced with the file's base name; without a placeholder
    /// the base name is appended as the final argument.
    #[serde(default)]
    pub command: String,
}

/// `[sink]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SinkSection {
    /// Extra sinks by registry name (e.g. `"stdout"`, `"file"`).
    ///
    /// The logging sink is always present regardless of this list.
    #[serde(default)]
    pub sinks: Vec<String>,

    /// Destination for the `"file"` sink.
    #[serde(default = "default_sink_file_path")]
    pub file_path: String,
}

fn default_sink_file_path() -> String {
    "autotest-results.log".to_string()
}

impl Default for SinkSection {
    fn default() -> Self {
        Self {
            sinks: Vec::new(),
            file_path: default_sink_file_path(),
        }
    }
}

/// Validated configuration.
///
/// Constructed only through `ConfigFile::try_from(RawConfigFile)`, which
/// runs the semantic checks in [`super::validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    watch: WatchSection,
    runner: RunnerSection,
    sink: SinkSection,
}

impl ConfigFile {
    /// Used by `TryFrom<RawConfigFile>` after validation has passed.
    pub(crate) fn new_unchecked(
        watch: WatchSection,
        runner: RunnerSection,
        sink: SinkSection,
    ) -> Self {
        Self {
            watch,
            runner,
            sink,
        }
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }

    pub fn runner(&self) -> &RunnerSection {
        &self.runner
    }

    pub fn sink(&self) -> &SinkSection {
        &self.sink
    }
}
