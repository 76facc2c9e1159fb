//! Range-scan bounds and ordering.

use std::collections::BTreeSet;

use proptest::prelude::*;
use worksledger::{key, MemoryLedger, RangeScanner, RecordStore};

use crate::test_utils::*;

fn scanned(scanner: &RangeScanner, start: &str, end: &str) -> Vec<String> {
    scanner
        .scan_range(start, end)
        .unwrap()
        .map(|hit| hit.unwrap().key)
        .collect()
}

#[test]
fn test_scan_range_is_half_open() {
    let (ledger, store) = store();
    for id in ["w1", "w2", "w3", "x1"] {
        store.create(&work(id, "blue", 35, "tom")).unwrap();
    }
    let scanner = RangeScanner::new(ledger.clone());
    assert_eq!(scanned(&scanner, "w1", "w3"), ["w1", "w2"]);
    assert_eq!(scanned(&scanner, "w2", ""), ["w2", "w3", "x1"]);
    assert!(scanned(&scanner, "w3", "w1").is_empty());
}

#[test]
fn test_scan_range_skips_index_entries() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    let scanner = RangeScanner::new(ledger.clone());
    assert_eq!(scanned(&scanner, "", ""), ["w1"]);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn test_index_prefix_scan_is_exact_on_segments() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    store.create(&work("w2", "bluegreen", 35, "tom")).unwrap();
    store.create(&work("w3", "blue", 35, "tom")).unwrap();

    let ids: Vec<String> = RangeScanner::new(ledger.clone())
        .scan_by_index_prefix("workstartdate~uid", &["blue"])
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ids, ["w1", "w3"]);
}

#[test]
fn test_scan_snapshot_tolerates_writes() {
    let (ledger, store) = store();
    for id in ["w1", "w2"] {
        store.create(&work(id, "blue", 35, "tom")).unwrap();
    }
    let scanner = RangeScanner::new(ledger.clone());
    let mut seen = Vec::new();
    for hit in scanner.scan_range("", "").unwrap() {
        let hit = hit.unwrap();
        store.create(&work(&format!("{}b", hit.key), "red", 1, "x")).unwrap();
        seen.push(hit.key);
    }
    assert_eq!(seen, ["w1", "w2"]);
    assert!(store.exists("w2b").unwrap());
}

proptest! {
    #[test]
    fn prop_scan_range_matches_model(
        ids in prop::collection::btree_set("[a-z0-9]{1,6}", 0..24),
        start in "[a-z0-9]{0,4}",
        end in "[a-z0-9]{0,4}",
    ) {
        let ledger = std::sync::Arc::new(MemoryLedger::new());
        let store = RecordStore::new(ledger.clone(), marbles_index());
        for id in &ids {
            store.create(&work(id, "blue", 1, "tom")).unwrap();
        }

        let got = scanned(&RangeScanner::new(ledger.clone()), &start, &end);
        let expected: Vec<String> = ids
            .iter()
            .filter(|id| {
                id.as_str() >= start.as_str() && (end.is_empty() || id.as_str() < end.as_str())
            })
            .cloned()
            .collect();
        prop_assert_eq!(&got, &expected);
        prop_assert!(got.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_index_prefix_finds_exactly_matching_ids(
        assignments in prop::collection::btree_map(
            "[a-z]{1,4}",
            prop::sample::select(vec!["blue", "red", "bl"]),
            1..16,
        ),
    ) {
        let ledger = std::sync::Arc::new(MemoryLedger::new());
        let store = RecordStore::new(ledger.clone(), marbles_index());
        for (id, start) in &assignments {
            store.create(&work(id, start, 1, "tom")).unwrap();
        }
        let got: BTreeSet<String> = RangeScanner::new(ledger.clone())
            .scan_by_index_prefix("workstartdate~uid", &["blue"])
            .unwrap()
            .map(|id| id.unwrap())
            .collect();
        let expected: BTreeSet<String> = assignments
            .iter()
            .filter(|(_, start)| **start == "blue")
            .map(|(id, _)| id.clone())
            .collect();
        prop_assert_eq!(got, expected);

        let prefix = key::prefix("workstartdate~uid", &["blue"]).unwrap();
        prop_assert!(prefix.starts_with('\0'));
    }
}
