//! Predicate queries and field queries.

use std::sync::Arc;

use worksledger::{ErrorKind, Executor, ExecutorConfig, LedgerOptions, MemoryLedger, QueryExecutor};

use crate::test_utils::*;

#[test]
fn test_selector_query_through_primitive() {
    let (ledger, store) = store();
    store.create(&work("w1", "blue", 35, "tom")).unwrap();
    store.create(&work("w2", "red", 50, "tom")).unwrap();
    store.create(&work("w3", "blue", 70, "jerry")).unwrap();

    let queries = QueryExecutor::new(ledger.clone());
    let hits: Vec<String> = queries
        .query(concat!(
            r#"{"selector":{"docType":"work","workstartdate":"blue"},"#,
            r#""sort":[{"workenddate":"desc"}]}"#
        ))
        .unwrap()
        .map(|hit| hit.unwrap().key)
        .collect();
    assert_eq!(hits, ["w3", "w1"]);

    let hits: Vec<String> = queries
        .query_by_field("workexperience", "TOM")
        .unwrap()
        .map(|hit| hit.unwrap().key)
        .collect();
    assert_eq!(hits, ["w1", "w2"]);
}

#[test]
fn test_query_never_returns_index_entries() {
    let exec = executor();
    seed(&exec);
    let payload = exec.invoke("queryWorks", &[r#"{"selector":{}}"#]).unwrap();
    assert_eq!(keys(&payload), ["w1", "w2", "w3"]);
}

#[test]
fn test_query_limit_and_fields() {
    let exec = executor();
    seed(&exec);
    let payload = exec
        .invoke(
            "queryworks",
            &[r#"{"selector":{"workexperience":"tom"},"fields":["uid"],"limit":2}"#],
        )
        .unwrap();
    let hits = json(&payload);
    assert_eq!(hits.as_array().unwrap().len(), 2);
    assert_eq!(hits[0]["Record"], serde_json::json!({"uid": "w1"}));
}

#[test]
fn test_field_query_value_is_escaped() {
    let exec = executor();
    seed(&exec);
    let payload = exec
        .invoke("queryWorksByWorkexperience", &[r#"tom","docType":"x"#])
        .unwrap();
    assert!(keys(&payload).is_empty());
}

#[test]
fn test_query_errors() {
    let exec = executor();
    for bad in ["not json", r#"{"fields":["uid"]}"#, r#"{"selector":{"a":{"$regex":"x"}}}"#] {
        let rejection = exec.invoke("queryWorks", &[bad]).unwrap_err();
        assert_eq!(rejection.kind, ErrorKind::QuerySyntax, "{}", bad);
    }

    let plain = MemoryLedger::with_options(LedgerOptions::new().rich_query(false));
    let exec = Executor::new(Arc::new(plain), ExecutorConfig::default()).unwrap();
    let rejection = exec
        .invoke("queryWorksByWorkexperience", &["tom"])
        .unwrap_err();
    assert_eq!(rejection.kind, ErrorKind::QueryUnsupported);
}
