// src/watch/detector.rs

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{AutotestError, Result};
use crate::fs::FileSystem;
use crate::watch::patterns::PatternSet;
use crate::watch::snapshot::{diff_snapshots, ChangeEvent, Snapshot, SnapshotSet};

/// Polls the watched tree and reports which tracked files changed since the
/// previous check.
///
/// The detector exclusively owns the previous snapshot set. Every check
/// walks the whole tree, builds a fresh set, diffs it against the previous
/// one and replaces it wholesale.
#[derive(Debug)]
pub struct ChangeDetector {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    filter: PatternSet,
    previous: SnapshotSet,
}

impl ChangeDetector {
    /// The watched root must exist and be a directory.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        root: impl Into<PathBuf>,
        filter: PatternSet,
    ) -> Result<Self> {
        let root = root.into();
        if !fs.is_dir(&root) {
            return Err(AutotestError::ConfigError(format!(
                "{:?} is not a directory",
                root
            )));
        }
        Ok(Self {
            fs,
            root,
            filter,
            previous: SnapshotSet::new(),
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Take the baseline walk without emitting a change event.
    ///
    /// The first run establishes what already exists; it must not report
    /// every existing file as changed.
    pub fn start(&mut self) {
        self.previous = self.take_snapshots();
        debug!(
            files = self.previous.len(),
            root = ?self.root,
            "baseline snapshot taken"
        );
    }

    /// Walk the tree and report the files changed since the last call.
    ///
    /// The previous snapshot set is replaced unconditionally, even when the
    /// diff is empty. An empty diff yields `None`: no-op checks are silent.
    pub fn check(&mut self) -> Option<ChangeEvent> {
        let current = self.take_snapshots();
        let diff = diff_snapshots(&current, &self.previous);
        self.previous = current;

        if diff.is_empty() {
            return None;
        }

        let mut files: Vec<PathBuf> = diff.into_iter().map(Snapshot::into_path).collect();
        files.sort();
        Some(ChangeEvent {
            files,
            root: self.root.clone(),
        })
    }

    /// Walk the tree, snapshotting every tracked file.
    ///
    /// Unreadable directories are skipped for that subtree only. The
    /// visited set holds canonicalized paths so symlink loops can't make
    /// one walk revisit a directory.
    fn take_snapshots(&self) -> SnapshotSet {
        let mut snapshots = SnapshotSet::new();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            let canonical = match self.fs.canonicalize(&dir) {
                Ok(p) => p,
                Err(err) => {
                    debug!(?dir, error = %err, "skipping directory that can't be resolved");
                    continue;
                }
            };
            if !visited.insert(canonical) {
                continue;
            }

            let entries = match self.fs.read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    debug!(?dir, error = %err, "skipping unreadable directory");
                    continue;
                }
            };

            for path in entries {
                if self.fs.is_dir(&path) {
                    stack.push(path);
                } else if self.fs.is_file(&path) && self.filter.is_tracked(&path) {
                    match self.fs.modified(&path) {
                        Ok(mtime) => {
                            snapshots.insert(Snapshot::new(path, mtime));
                        }
                        Err(err) => {
                            debug!(?path, error = %err, "skipping file without readable mtime");
                        }
                    }
                }
            }
        }

        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn detector(fs: &MockFileSystem, include: &[&str], exclude: &[&str]) -> ChangeDetector {
        fs.add_dir("root");
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        let filter = PatternSet::new(&include, &exclude).unwrap();
        ChangeDetector::new(Arc::new(fs.clone()), "root", filter).unwrap()
    }

    #[test]
    fn construction_fails_on_missing_root() {
        let fs = MockFileSystem::new();
        let filter = PatternSet::new(&[r".*\.java".to_string()], &[]).unwrap();
        let err = ChangeDetector::new(Arc::new(fs), "nope", filter).unwrap_err();
        assert!(matches!(err, AutotestError::ConfigError(_)));
    }

    #[test]
    fn baseline_then_unchanged_check_is_silent() {
        let fs = MockFileSystem::new();
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);

        det.start();
        assert!(det.check().is_none());
    }

    #[test]
    fn modified_file_is_reported_exactly_once() {
        let fs = MockFileSystem::new();
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);
        det.start();

        fs.set_modified("root/A.java", MockFileSystem::mtime(2));
        let event = det.check().expect("mtime bump should produce an event");
        assert_eq!(event.files, vec![PathBuf::from("root/A.java")]);
        assert_eq!(event.root, PathBuf::from("root"));

        // Idempotence: nothing changed since the last check.
        assert!(det.check().is_none());
    }

    #[test]
    fn new_file_in_subdirectory_is_reported() {
        let fs = MockFileSystem::new();
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);
        det.start();

        fs.add_file("root/sub/B.java", MockFileSystem::mtime(5));
        let event = det.check().expect("new file should produce an event");
        assert_eq!(event.files, vec![PathBuf::from("root/sub/B.java")]);
    }

    #[test]
    fn rejected_files_never_appear() {
        let fs = MockFileSystem::new();
        let mut det = detector(&fs, &[r".*Test\.java"], &[r".*IgnoreTest\.java"]);
        det.start();

        fs.add_file("root/FooTest.java", MockFileSystem::mtime(3));
        fs.add_file("root/BarIgnoreTest.java", MockFileSystem::mtime(3));
        let event = det.check().expect("FooTest.java changed");
        assert_eq!(event.files, vec![PathBuf::from("root/FooTest.java")]);
    }

    #[test]
    fn moved_file_with_same_mtime_is_not_a_change() {
        let fs = MockFileSystem::new();
        fs.add_file("root/a/Foo.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);
        det.start();

        // Snapshot identity is (base name, mtime): relocating the file
        // without touching its mtime keeps the same identity.
        fs.remove_file("root/a/Foo.java");
        fs.add_file("root/b/Foo.java", MockFileSystem::mtime(1));
        assert!(det.check().is_none());

        // A move that also bumps the mtime is a change.
        fs.remove_file("root/b/Foo.java");
        fs.add_file("root/c/Foo.java", MockFileSystem::mtime(2));
        let event = det.check().expect("mtime changed along with the move");
        assert_eq!(event.files, vec![PathBuf::from("root/c/Foo.java")]);
    }

    #[test]
    fn deleted_file_is_not_a_change() {
        let fs = MockFileSystem::new();
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);
        det.start();

        fs.remove_file("root/A.java");
        assert!(det.check().is_none());

        // And re-creating it with the old mtime is invisible too.
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        assert!(det.check().is_none());
    }

    #[test]
    fn check_without_start_reports_everything_existing() {
        let fs = MockFileSystem::new();
        fs.add_file("root/A.java", MockFileSystem::mtime(1));
        fs.add_file("root/B.java", MockFileSystem::mtime(1));
        let mut det = detector(&fs, &[r".*\.java"], &[]);

        let event = det.check().expect("no baseline, all files are new");
        assert_eq!(event.files.len(), 2);
    }
}
