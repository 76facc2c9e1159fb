//! Record and index-entry invariants.

use serde_json::Value;
use worksledger::{key, ErrorKind, IndexPolicy, IndexSpec, RecordStore, INDEX_MARKER};

use crate::test_utils::*;

// --- Create ---

#[test]
fn test_create_writes_record_and_one_index_entry() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();

    let dump = ledger.dump();
    assert_eq!(dump.len(), 2);
    let index_key = key::encode("workstartdate~uid", &["blue", "w1"]).unwrap();
    assert_eq!(dump[0].0, index_key);
    assert_eq!(dump[0].1, INDEX_MARKER.to_vec());
    assert_eq!(dump[1].0, "w1");

    let stored: Value = serde_json::from_slice(&dump[1].1).unwrap();
    assert_eq!(stored["docType"], "work");
    assert_eq!(stored["uid"], "w1");
    assert_eq!(stored["workenddate"], 35);
}

#[test]
fn test_create_existing_leaves_state_unchanged() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    let before = ledger.dump();

    let err = store.create(&work("w1", "red", 1, "jerry")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(ledger.dump(), before);
}

#[test]
fn test_create_rejects_bad_ids() {
    let (ledger, store) = store();
    for id in ["", "\u{0}w1"] {
        let err = store.create(&work(id, "blue", 35, "tom")).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::InvalidArgument | ErrorKind::MalformedKey),
            "{:?}",
            err
        );
    }
    assert!(ledger.is_empty());
}

#[test]
fn test_create_index_write_failure_is_inconsistency() {
    let (ledger, store) = faulty_store();
    let index_key = key::encode("workstartdate~uid", &["blue", "w1"]).unwrap();
    ledger.fail_key(index_key);

    let err = store.create(&work("w1", "blue", 35, "tom")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexInconsistency);
    assert!(ledger.inner().dump().iter().any(|(k, _)| k == "w1"));
}

// --- Delete ---

#[test]
fn test_delete_missing_is_not_found() {
    let (_, store) = store();
    assert_eq!(store.delete("w9").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_delete_index_failure_reports_orphan() {
    let (ledger, store) = faulty_store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    let index_key = key::encode("workstartdate~uid", &["blue", "w1"]).unwrap();
    ledger.fail_key(index_key.clone());

    let err = store.delete("w1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexInconsistency);
    assert!(!store.exists("w1").unwrap());

    let remaining = ledger.inner().dump();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].0, index_key);
}

// --- Update ---

#[test]
fn test_update_indexed_field_keeps_stale_index_by_default() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    store
        .update_field("w1", "workstartdate", Value::from("green"))
        .unwrap();

    let stale = key::encode("workstartdate~uid", &["blue", "w1"]).unwrap();
    let fresh = key::encode("workstartdate~uid", &["green", "w1"]).unwrap();
    let keys: Vec<String> = ledger.dump().into_iter().map(|(k, _)| k).collect();
    assert!(keys.contains(&stale));
    assert!(!keys.contains(&fresh));
}

#[test]
fn test_update_indexed_field_rekeys_when_enabled() {
    let (ledger, _) = store();
    let store = RecordStore::new(ledger.clone(), marbles_index()).with_policy(IndexPolicy::Rekey);
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    store
        .update_field("w1", "workstartdate", Value::from("green"))
        .unwrap();

    let fresh = key::encode("workstartdate~uid", &["green", "w1"]).unwrap();
    let keys: Vec<String> = ledger.dump().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![fresh, "w1".to_string()]);

    store.delete("w1").unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_update_protected_fields_rejected() {
    let (_, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    for field in ["docType", "uid"] {
        let err = store.update_field("w1", field, Value::from("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert_eq!(
        store
            .update_field("w9", "workexperience", Value::from("x"))
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_numeric_index_field() {
    let (ledger, _) = store();
    let store = RecordStore::new(ledger.clone(), IndexSpec::new("end~uid", "workenddate"));
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    let index_key = key::encode("end~uid", &["35", "w1"]).unwrap();
    assert!(ledger.dump().iter().any(|(k, _)| *k == index_key));
}
