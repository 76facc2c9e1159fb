//! Version history and tombstones.

use serde_json::Value;
use worksledger::{HistoryReader, LedgerOptions, MemoryLedger, RecordStore, Substrate};

use crate::test_utils::*;

#[test]
fn test_create_update_delete_history() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    store
        .update_field("w1", "workexperience", Value::from("jerry"))
        .unwrap();
    store.delete("w1").unwrap();

    let entries: Vec<_> = HistoryReader::new(ledger.clone())
        .history("w1")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 3);

    assert!(!entries[0].is_delete);
    assert_eq!(entries[0].value.as_ref().unwrap()["workexperience"], "tom");
    assert_eq!(entries[1].value.as_ref().unwrap()["workexperience"], "jerry");
    assert!(entries[2].is_delete);
    assert!(entries[2].value.is_none());

    assert!(entries.windows(2).all(|w| w[0].tx_id != w[1].tx_id));
}

#[test]
fn test_history_survives_recreate() {
    let exec = executor();
    exec.invoke("initWork", &["w1", "blue", "35", "tom"]).unwrap();
    exec.invoke("delete", &["w1"]).unwrap();
    exec.invoke("initWork", &["w1", "red", "40", "ann"]).unwrap();

    let history = json(&exec.invoke("getHistoryForWork", &["w1"]).unwrap());
    let flags: Vec<bool> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["IsDelete"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, [false, true, false]);
    assert_eq!(history[2]["Value"]["workstartdate"], "red");
}

#[test]
fn test_history_of_unknown_id_is_empty() {
    let exec = executor();
    let history = json(&exec.invoke("getHistoryForWork", &["w9"]).unwrap());
    assert_eq!(history, Value::Array(Vec::new()));
}

#[test]
fn test_history_disabled_is_empty() {
    let options = LedgerOptions::new().history(false);
    let ledger = std::sync::Arc::new(MemoryLedger::with_options(options));
    let store = RecordStore::new(ledger.clone(), marbles_index());
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    assert_eq!(HistoryReader::new(ledger.clone()).history("w1").unwrap().count(), 0);
}

#[test]
fn test_non_json_history_is_base64() {
    let ledger = std::sync::Arc::new(MemoryLedger::new());
    ledger.put("raw", vec![0xff, 0x00]).unwrap();
    let entries: Vec<_> = HistoryReader::new(ledger.clone())
        .history("raw")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries[0].value.as_ref().unwrap()["$bytes"], "/wA=");
}
