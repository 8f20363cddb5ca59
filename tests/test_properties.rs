//! Property tests for build, lookup and range scan

use std::collections::BTreeSet;

use isam::{Isam, IsamConfig, Key};
use proptest::prelude::*;

fn sorted_distinct() -> impl Strategy<Value = Vec<Key>> {
    prop::collection::btree_set(-10_000i32..10_000, 0..400)
        .prop_map(|set| set.into_iter().collect())
}

fn layout() -> impl Strategy<Value = IsamConfig> {
    (1usize..9, 1usize..6, 2usize..7).prop_map(|(data, overflow, fan_out)| IsamConfig {
        data_page_capacity: data,
        overflow_page_capacity: overflow,
        fan_out,
    })
}

proptest! {
    #[test]
    fn prop_build_round_trip(keys in sorted_distinct(), config in layout()) {
        let mut isam = Isam::with_config(config).unwrap();
        isam.build(&keys);
        prop_assert!(isam.verify().is_ok());
        for &key in &keys {
            prop_assert_eq!(isam.get(key), Some(key));
        }
    }

    #[test]
    fn prop_absent_keys_not_found(keys in sorted_distinct(), key in -10_500i32..10_500) {
        let mut isam = Isam::new();
        isam.build(&keys);
        let expected = keys.binary_search(&key).ok().map(|_| key);
        prop_assert_eq!(isam.get(key), expected);
    }

    #[test]
    fn prop_range_scan_after_build_is_exact(
        keys in sorted_distinct(),
        config in layout(),
        a in -10_500i32..10_500,
        b in -10_500i32..10_500,
    ) {
        let mut isam = Isam::with_config(config).unwrap();
        isam.build(&keys);
        let expected: Vec<Key> = if a > b {
            Vec::new()
        } else {
            keys.iter().copied().filter(|k| (a..=b).contains(k)).collect()
        };
        // Without overflow the scan follows physical order, which is sorted.
        prop_assert_eq!(isam.range_scan(a, b), expected);
    }

    #[test]
    fn prop_inserts_keep_index_and_lookups(
        keys in sorted_distinct(),
        inserts in prop::collection::vec(-10_500i32..10_500, 0..200),
        config in layout(),
    ) {
        let mut isam = Isam::with_config(config).unwrap();
        isam.build(&keys);
        let separators: Vec<Vec<Key>> = isam.walk_index().map(|l| l.keys.to_vec()).collect();
        let pages = isam.page_count();

        for &key in &inserts {
            isam.insert(key);
        }

        let mut all: BTreeSet<Key> = keys.iter().copied().collect();
        all.extend(inserts.iter().copied());
        for key in all {
            prop_assert_eq!(isam.get(key), Some(key));
        }
        prop_assert_eq!(isam.len(), keys.len() + inserts.len());

        if !keys.is_empty() {
            let after: Vec<Vec<Key>> = isam.walk_index().map(|l| l.keys.to_vec()).collect();
            prop_assert_eq!(separators, after);
            prop_assert_eq!(pages, isam.page_count());
        }
        prop_assert!(isam.verify().is_ok());
    }

    #[test]
    fn prop_range_scan_never_reports_out_of_range(
        keys in sorted_distinct(),
        inserts in prop::collection::vec(-10_500i32..10_500, 0..100),
        a in -10_500i32..10_500,
        b in -10_500i32..10_500,
    ) {
        let mut isam = Isam::new();
        isam.build(&keys);
        for &key in &inserts {
            isam.insert(key);
        }
        for value in isam.range_scan(a, b) {
            prop_assert!(a <= value && value <= b);
        }
    }
}
