//! Bulk transfer by index value.

use std::sync::Arc;

use serde_json::Value;
use worksledger::{
    ErrorKind, Executor, ExecutorConfig, FaultInjector, LedgerError, MemoryLedger, RangeScanner,
    Substrate,
};

use crate::test_utils::*;

fn owners(store: &worksledger::RecordStore, ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| store.read(id).unwrap().field_text("workexperience").unwrap())
        .collect()
}

#[test]
fn test_transfer_all_matches() {
    let (ledger, store) = store();
    for (id, start) in [("w1", "blue"), ("w2", "red"), ("w3", "blue"), ("w4", "blue")] {
        store.create(&work(id, start, 35, "tom")).unwrap();
    }
    let scanner = RangeScanner::new(ledger.clone());

    let n = scanner
        .transfer_by_index(&store, "blue", "workexperience", &Value::from("jerry"))
        .unwrap();
    assert_eq!(n, 3);
    assert_eq!(owners(&store, &["w1", "w2", "w3", "w4"]), ["jerry", "tom", "jerry", "jerry"]);
}

#[test]
fn test_transfer_no_matches_is_success() {
    let (ledger, store) = store();
    store.create(&work("w1", "red", 35, "tom")).unwrap();
    let n = RangeScanner::new(ledger.clone())
        .transfer_by_index(&store, "blue", "workexperience", &Value::from("jerry"))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn test_transfer_stops_at_failing_record() {
    let (ledger, store) = faulty_store();
    for id in ["w1", "w2", "w3", "w4"] {
        store.create(&work(id, "blue", 35, "tom")).unwrap();
    }
    ledger.fail_key("w3");
    let substrate: Arc<dyn Substrate> = ledger.clone();

    let err = RangeScanner::new(substrate)
        .transfer_by_index(&store, "blue", "workexperience", &Value::from("jerry"))
        .unwrap_err();
    match &err {
        LedgerError::TransferAborted {
            transferred,
            record_id,
            ..
        } => {
            assert_eq!(*transferred, 2);
            assert_eq!(record_id, "w3");
        }
        other => panic!("expected TransferAborted, got {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Substrate);
    assert_eq!(owners(&store, &["w1", "w2", "w3", "w4"]), ["jerry", "jerry", "tom", "tom"]);
}

#[test]
fn test_transfer_failure_through_executor() {
    let ledger = Arc::new(FaultInjector::new(MemoryLedger::new()));
    let exec = Executor::new(ledger.clone(), ExecutorConfig::default()).unwrap();
    seed(&exec);
    ledger.fail_key("w3");

    let rejection = exec
        .invoke("transferWorksBasedOnWorkstartdate", &["blue", "jerry"])
        .unwrap_err();
    assert_eq!(rejection.kind, ErrorKind::Substrate);
    assert!(rejection.message.contains("after 1 works at w3"), "{}", rejection.message);

    let w1 = json(&exec.invoke("readWork", &["w1"]).unwrap());
    let w3 = json(&exec.invoke("readWork", &["w3"]).unwrap());
    assert_eq!(w1["workexperience"], "jerry");
    assert_eq!(w3["workexperience"], "tom");
}

#[test]
fn test_transfer_uses_index_not_current_field() {
    let exec = executor();
    seed(&exec);
    exec.context()
        .records
        .update_field("w1", "workstartdate", Value::from("green"))
        .unwrap();

    let moved = exec.invoke("transferWorksBasedOnIndex", &["blue", "jerry"]).unwrap();
    assert_eq!(moved, b"Transferred 2 blue works to jerry");
    let moved = exec.invoke("transferWorksBasedOnIndex", &["green", "ann"]).unwrap();
    assert_eq!(moved, b"Transferred 0 green works to ann");
}
