// tests/diff_property.rs
//
// Property: the reported changed set equals exactly the snapshots in the
// current set absent from the previous set, compared by (name, mtime),
// independent of insertion order.

use std::collections::HashSet;

use proptest::prelude::*;

use autotest::watch::snapshot::{diff_snapshots, Snapshot, SnapshotSet};

fn snapshot_set_strategy() -> impl Strategy<Value = SnapshotSet> {
    proptest::collection::vec((0..20u8, 0..5u64), 0..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name_idx, secs)| {
                Snapshot::new(
                    format!("file_{name_idx}.java"),
                    std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn diff_is_exact_set_difference(
        previous in snapshot_set_strategy(),
        current in snapshot_set_strategy(),
    ) {
        let diff: HashSet<Snapshot> = diff_snapshots(&current, &previous).into_iter().collect();

        let expected: HashSet<Snapshot> = current
            .iter()
            .filter(|s| !previous.contains(s))
            .cloned()
            .collect();

        prop_assert_eq!(diff, expected);
    }

    #[test]
    fn diff_against_self_is_empty(set in snapshot_set_strategy()) {
        prop_assert!(diff_snapshots(&set, &set).is_empty());
    }

    #[test]
    fn diff_never_reports_deletions(
        previous in snapshot_set_strategy(),
        current in snapshot_set_strategy(),
    ) {
        for snap in diff_snapshots(&current, &previous) {
            prop_assert!(current.contains(&snap));
        }
    }
}
