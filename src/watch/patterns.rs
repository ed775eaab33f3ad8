// src/watch/patterns.rs

use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::errors::{AutotestError, Result};

/// Compiled include/exclude patterns deciding which files are tracked.
///
/// A file is tracked iff its **base name** (never the full path) fully
/// matches at least one accept pattern and no reject pattern. Identically
/// named files in different subdirectories are therefore filtered the same
/// way.
#[derive(Debug, Clone)]
pub struct PatternSet {
    accept: Vec<Regex>,
    reject: Vec<Regex>,
}

impl PatternSet {
    /// Compile include/exclude regex lists into a pattern set.
    ///
    /// Unparseable patterns are warned about and skipped. If no include
    /// pattern survives compilation the set would track nothing, which is
    /// a configuration error rather than a silently idle daemon.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let accept = compile_patterns(include);
        if accept.is_empty() {
            return Err(AutotestError::ConfigError(
                "no valid include pattern; the daemon would never track a file".to_string(),
            ));
        }
        let reject = compile_patterns(exclude);
        Ok(Self { accept, reject })
    }

    /// Whether this path should be tracked for changes.
    ///
    /// Pure function of the path's base name and the two pattern sets.
    pub fn is_tracked(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !self.accept.iter().any(|re| re.is_match(name)) {
            return false;
        }
        !self.reject.iter().any(|re| re.is_match(name))
    }
}

/// Compile raw regex strings, dropping invalid ones with a warning.
///
/// Patterns are anchored so that a pattern must match the whole base name,
/// not a substring of it.
fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for pat in patterns {
        let anchored = format!("^(?:{pat})$");
        match Regex::new(&anchored) {
            Ok(re) => compiled.push(re),
            Err(err) => {
                warn!(pattern = %pat, error = %err, "can't compile pattern; skipping");
            }
        }
    }
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn set(include: &[&str], exclude: &[&str]) -> PatternSet {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        PatternSet::new(&include, &exclude).unwrap()
    }

    #[test]
    fn tracked_iff_accepted_and_not_rejected() {
        let ps = set(&[r".*Test\.java"], &[r".*IgnoreTest\.java"]);
        assert!(ps.is_tracked(Path::new("src/FooTest.java")));
        assert!(!ps.is_tracked(Path::new("src/BarIgnoreTest.java")));
        assert!(!ps.is_tracked(Path::new("src/Foo.java")));
    }

    #[test]
    fn matching_is_against_base_name_only() {
        let ps = set(&[r"FooTest\.java"], &[]);
        // The directory part must not take part in the match.
        assert!(ps.is_tracked(Path::new("deeply/nested/dir/FooTest.java")));
        assert!(!ps.is_tracked(Path::new("FooTest.java/other.txt")));
    }

    #[test]
    fn patterns_match_the_whole_name_not_a_substring() {
        let ps = set(&[r"Test\.java"], &[]);
        assert!(ps.is_tracked(Path::new("Test.java")));
        assert!(!ps.is_tracked(Path::new("MyTest.java")));
    }

    #[test]
    fn empty_include_list_is_a_config_error() {
        let err = PatternSet::new(&[], &[]).unwrap_err();
        assert!(matches!(err, AutotestError::ConfigError(_)));
    }

    #[test]
    fn all_invalid_includes_is_a_config_error() {
        let err = PatternSet::new(&["***".to_string()], &[]).unwrap_err();
        assert!(matches!(err, AutotestError::ConfigError(_)));
    }

    #[test]
    fn invalid_pattern_is_skipped_not_fatal() {
        let ps = PatternSet::new(
            &["***".to_string(), r".*Test\.java".to_string()],
            &["(((".to_string()],
        )
        .unwrap();
        assert!(ps.is_tracked(Path::new("FooTest.java")));
    }
}
