// src/watch/snapshot.rs

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::SystemTime;

/// Minimal fingerprint of a tracked file: its base name and
/// last-modification time. Two snapshots are equal iff both fields are
/// equal; the full path rides along only so the change event can report
/// which file to test. A file whose content changes without touching the
/// mtime is indistinguishable from unchanged, and a file moved between
/// subdirectories with an unchanged mtime keeps its identity. That is
/// inherent to the polling design, not something to fix here.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
    name: OsString,
    modified: SystemTime,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_else(|| path.as_os_str())
            .to_os_string();
        Self {
            path,
            name,
            modified,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.modified == other.modified
    }
}

impl Eq for Snapshot {}

impl Hash for Snapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.modified.hash(state);
    }
}

/// The set of snapshots taken in one walk, unique by (name, mtime).
///
/// Owned exclusively by the change detector and replaced wholesale on every
/// check, never mutated in place.
pub type SnapshotSet = HashSet<Snapshot>;

/// Files changed in a single check cycle (the "change batch").
///
/// Only produced when the diff is non-empty; a no-op check is silent.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Changed file paths, sorted for deterministic downstream handling.
    pub files: Vec<PathBuf>,
    /// The watched root the batch was detected under.
    pub root: PathBuf,
}

/// Snapshots present in `current` but absent from `previous`, compared by
/// the (name, mtime) pair. There is no timestamp ordering involved: a file
/// reverted to a previously-seen (name, mtime) pair is invisible.
pub fn diff_snapshots(current: &SnapshotSet, previous: &SnapshotSet) -> Vec<Snapshot> {
    current.difference(previous).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snap(path: &str, secs: u64) -> Snapshot {
        Snapshot::new(path, SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[test]
    fn equality_requires_both_fields() {
        assert_eq!(snap("a.rs", 1), snap("a.rs", 1));
        assert_ne!(snap("a.rs", 1), snap("a.rs", 2));
        assert_ne!(snap("a.rs", 1), snap("b.rs", 1));
    }

    #[test]
    fn identity_is_the_base_name_not_the_full_path() {
        // Same name, same mtime, different directories: one identity.
        assert_eq!(snap("a/Foo.java", 1).name(), "Foo.java");
        assert_eq!(snap("a/Foo.java", 1), snap("b/Foo.java", 1));
        assert_ne!(snap("a/Foo.java", 1), snap("b/Foo.java", 2));
    }

    #[test]
    fn diff_is_current_minus_previous() {
        let previous: SnapshotSet = [snap("a.rs", 1), snap("b.rs", 1)].into_iter().collect();
        let current: SnapshotSet = [snap("a.rs", 2), snap("b.rs", 1), snap("c.rs", 1)]
            .into_iter()
            .collect();

        let mut diff = diff_snapshots(&current, &previous);
        diff.sort_by(|a, b| a.path().cmp(b.path()));
        assert_eq!(diff, vec![snap("a.rs", 2), snap("c.rs", 1)]);
    }

    #[test]
    fn deleted_files_do_not_appear_in_the_diff() {
        let previous: SnapshotSet = [snap("a.rs", 1), snap("b.rs", 1)].into_iter().collect();
        let current: SnapshotSet = [snap("a.rs", 1)].into_iter().collect();
        assert!(diff_snapshots(&current, &previous).is_empty());
    }
}
