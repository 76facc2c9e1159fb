//! The create / scan / delete walkthrough, through the primitives and
//! through the executor.

use worksledger::{ErrorKind, RangeScanner};

use crate::test_utils::*;

#[test]
fn test_scenario_primitives() {
    let (ledger, store) = store();
    let scanner = RangeScanner::new(ledger.clone());

    store.create(&work("w1", "blue", 35, "tom")).unwrap();

    let record = store.read("w1").unwrap();
    assert_eq!(record.field_text("workstartdate").unwrap(), "blue");
    assert_eq!(record.field_text("workexperience").unwrap(), "tom");

    let ids: Vec<String> = scanner
        .scan_by_index_prefix("workstartdate~uid", &["blue"])
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ids, vec!["w1"]);

    store.delete("w1").unwrap();
    assert_eq!(store.read("w1").unwrap_err().kind(), ErrorKind::NotFound);

    let ids: Vec<String> = scanner
        .scan_by_index_prefix("workstartdate~uid", &["blue"])
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(ids.is_empty());
    assert!(ledger.is_empty());
}

#[test]
fn test_scenario_commands() {
    let exec = executor();
    assert!(exec.invoke("initWork", &["w1", "blue", "35", "tom"]).unwrap().is_empty());

    let record = json(&exec.invoke("readWork", &["w1"]).unwrap());
    assert_eq!(record["uid"], "w1");
    assert_eq!(record["docType"], "work");

    exec.invoke("delete", &["w1"]).unwrap();
    let rejection = exec.invoke("readWork", &["w1"]).unwrap_err();
    assert_eq!(rejection.kind, ErrorKind::NotFound);

    let moved = exec
        .invoke("transferWorksBasedOnIndex", &["blue", "jerry"])
        .unwrap();
    assert_eq!(moved, b"Transferred 0 blue works to jerry");
}
