//! Shared fixtures for the conformance suite.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use worksledger::{
    Executor, ExecutorConfig, FaultInjector, IndexSpec, MemoryLedger, Record, RecordStore,
    Substrate,
};

/// Index used by the marbles-shaped fixtures
pub fn marbles_index() -> IndexSpec {
    IndexSpec::new("workstartdate~uid", "workstartdate")
}

/// A marbles-shaped work record
pub fn work(uid: &str, start: &str, end: i64, owner: &str) -> Record {
    Record::new(uid)
        .with_field("workstartdate", start)
        .with_field("workenddate", end)
        .with_field("workexperience", owner)
}

/// Fresh ledger and a record store over it
pub fn store() -> (Arc<MemoryLedger>, RecordStore) {
    let ledger = Arc::new(MemoryLedger::new());
    let store = RecordStore::new(ledger.clone(), marbles_index());
    (ledger, store)
}

/// Fault-injecting ledger and a record store over it
pub fn faulty_store() -> (Arc<FaultInjector<MemoryLedger>>, RecordStore) {
    let ledger = Arc::new(FaultInjector::new(MemoryLedger::new()));
    let substrate: Arc<dyn Substrate> = ledger.clone();
    (ledger, RecordStore::new(substrate, marbles_index()))
}

/// Executor over a fresh memory ledger with default configuration
pub fn executor() -> Executor {
    Executor::in_memory(ExecutorConfig::default()).unwrap()
}

/// Seed the standard three records: w1 blue/tom, w2 red/tom, w3 blue/tom
pub fn seed(exec: &Executor) {
    for args in [
        ["w1", "blue", "35", "tom"],
        ["w2", "red", "50", "tom"],
        ["w3", "blue", "70", "tom"],
    ] {
        exec.invoke("initWork", &args).unwrap();
    }
}

/// Parse a JSON payload
pub fn json(payload: &[u8]) -> Value {
    serde_json::from_slice(payload).unwrap()
}

/// Keys of a `[{"Key":..,"Record":..}]` payload
pub fn keys(payload: &[u8]) -> Vec<String> {
    json(payload)
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["Key"].as_str().unwrap().to_string())
        .collect()
}
