//! Overflow chain growth, custom layouts and compaction

use std::collections::HashSet;

use isam::{Error, IsamBuilder, IsamConfig, Isam, Key, Placement};

#[test]
fn test_overflow_chain_on_custom_layout() {
    let mut isam = IsamBuilder::new()
        .data_page_capacity(2)
        .overflow_page_capacity(3)
        .fan_out(4)
        .build(&[10, 20, 30, 40])
        .unwrap();

    // Page 0 holds [10, 20]; keys up to 20 route there.
    let placements: Vec<Placement> =
        [11, 12, 13, 14, 15].into_iter().map(|k| isam.insert(k)).collect();
    assert_eq!(
        placements,
        vec![
            Placement::NewOverflowPage,
            Placement::Overflow,
            Placement::Overflow,
            Placement::NewOverflowPage,
            Placement::Overflow,
        ]
    );

    let page = &isam.pages()[0];
    let chain: Vec<Vec<Key>> = page
        .overflow_pages()
        .map(|p| p.records().iter().map(|r| r.key).collect())
        .collect();
    assert_eq!(chain, vec![vec![11, 12, 13], vec![14, 15]]);
    assert!(isam.pages()[1].overflow().is_none());

    for key in [10, 11, 12, 13, 14, 15, 20, 30, 40] {
        assert_eq!(isam.get(key), Some(key));
    }
}

#[test]
fn test_unsorted_overflow_chain_lookup() {
    let mut isam = Isam::new();
    isam.build(&[100, 200, 300, 400]);

    // Descending inserts leave later overflow pages with smaller keys.
    let inserted: Vec<Key> = (0..20).rev().collect();
    for &key in &inserted {
        isam.insert(key);
    }

    let firsts: Vec<Key> = isam.pages()[0]
        .overflow_pages()
        .map(|p| p.records()[0].key)
        .collect();
    assert_eq!(firsts, vec![16, 12, 8, 4, 0]);

    for key in inserted {
        assert_eq!(isam.get(key), Some(key));
    }
    let scanned: HashSet<Key> = isam.range_scan(5, 150).into_iter().collect();
    let expected: HashSet<Key> = (5..20).chain([100]).collect();
    assert_eq!(scanned, expected);
}

#[test]
fn test_deep_index_with_wide_fan_out() {
    let config = IsamConfig { data_page_capacity: 8, overflow_page_capacity: 4, fan_out: 4 };
    let keys: Vec<Key> = (0..2000).map(|k| k * 3).collect();
    let mut isam = Isam::with_config(config).unwrap();
    isam.build(&keys);

    assert_eq!(isam.page_count(), 250);
    assert!(isam.depth() >= 4);
    isam.verify().unwrap();
    assert!(isam.walk_index().all(|level| level.keys.len() < config.fan_out));

    for &key in &keys {
        assert_eq!(isam.get(key), Some(key));
        assert_eq!(isam.get(key + 1), None);
    }

    let scanned = isam.range_scan(300, 599);
    assert_eq!(scanned, (100..200).map(|k| k * 3).collect::<Vec<_>>());
}

#[test]
fn test_rebuild_restores_complete_range_scans() {
    let mut isam = Isam::new();
    isam.build(&[3, 7, 9, 14, 15, 18, 21, 25, 30, 32, 40, 41, 50, 55, 60, 70]);
    isam.insert(42);
    isam.insert(43);

    // 42 and 43 sit in the chain of the page starting at 50, past the
    // fast-stop boundary for this range.
    let before: HashSet<Key> = isam.range_scan(40, 45).into_iter().collect();
    assert_eq!(before, HashSet::from([40, 41]));

    isam.rebuild();
    assert!(!isam.stats().has_overflow());
    let after: HashSet<Key> = isam.range_scan(40, 45).into_iter().collect();
    assert_eq!(after, HashSet::from([40, 41, 42, 43]));
    isam.verify().unwrap();
}

#[test]
fn test_try_build_reports_position() {
    let mut isam = Isam::new();
    let err = isam.try_build(&[1, 2, 3, 10, 9]).unwrap_err();
    assert_eq!(err, Error::UnsortedInput { index: 4, previous: 10, key: 9 });
    assert!(isam.is_empty());
}

#[test]
fn test_invalid_config() {
    let config = IsamConfig { fan_out: 0, ..IsamConfig::default() };
    assert!(matches!(Isam::with_config(config), Err(Error::InvalidParameter(_))));
}
