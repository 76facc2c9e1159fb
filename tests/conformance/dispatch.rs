//! The executor boundary: registry, rejections, configuration, work log and
//! sharing across threads.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use worksledger::{
    AttributedLog, ErrorKind, Executor, ExecutorConfig, IndexPolicy, LedgerOptions, MemoryLedger,
    Rejection, SchemaProfile,
};

use crate::test_utils::*;

const UID: &str = "0123456789abcdef0123456789abcdef";

// --- Registry ---

#[test]
fn test_registry_aliases_follow_schema() {
    let marbles = executor();
    assert!(marbles.registry().contains("transferWorksBasedOnWorkstartdate"));
    assert!(marbles.registry().contains("queryworksByworkexperience"));
    assert!(!marbles.registry().contains("transferworksBasedOnworkexperience"));

    let resume = Executor::in_memory(ExecutorConfig::new().schema(SchemaProfile::Resume)).unwrap();
    assert!(resume.registry().contains("transferworksBasedOnworkexperience"));
    assert!(resume.registry().contains("queryWorksByWorkstartdate"));
    assert!(!resume.registry().contains("transferWorksBasedOnWorkstartdate"));
}

#[test]
fn test_rejection_json_shape() {
    let exec = executor();
    let rejection = exec.invoke("selfDestruct", &["now"]).unwrap_err();
    assert_eq!(rejection.kind, ErrorKind::UnknownCommand);

    let wire = json(rejection.to_json().as_bytes());
    assert_eq!(wire["kind"], "UnknownCommand");
    assert!(wire["message"].as_str().unwrap().contains("selfDestruct"));

    let back: Rejection = serde_json::from_str(&rejection.to_json()).unwrap();
    assert_eq!(back, rejection);
}

#[test]
fn test_marbles_argument_validation() {
    let exec = executor();
    for args in [
        vec!["w1", "blue", "35"],
        vec!["w1", "", "35", "tom"],
        vec!["w1", "blue", "thirty", "tom"],
        vec!["w1", "blue", "35", "tom", "extra"],
    ] {
        let rejection = exec.invoke("initWork", &args).unwrap_err();
        assert_eq!(rejection.kind, ErrorKind::InvalidArgument, "{:?}", args);
    }
    assert!(keys(&exec.invoke("getWorksByRange", &["", ""]).unwrap()).is_empty());
}

// --- Configuration ---

#[test]
fn test_config_file_drives_executor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "schema = \"resume\"\nindex_policy = \"rekey\"\ncaller = \"User1@org1.example.com\""
    )
    .unwrap();

    let config = ExecutorConfig::load(file.path()).unwrap();
    assert_eq!(config.schema, SchemaProfile::Resume);
    assert_eq!(config.index_policy, IndexPolicy::Rekey);

    let exec = Executor::in_memory(config).unwrap();
    exec.invoke(
        "initWork",
        &[UID, "engineer", "20200101000000", "20190101000000", "20191231000000", "7"],
    )
    .unwrap();
    assert_eq!(exec.context().caller_member().unwrap(), "org1");
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(ExecutorConfig::from_toml_str("shema = \"resume\"").is_err());
    assert!(ExecutorConfig::load("/definitely/not/here.toml").is_err());
}

// --- Work log ---

#[test]
fn test_work_log_is_attributed_to_caller() {
    let ledger = Arc::new(MemoryLedger::with_options(
        LedgerOptions::new().caller("User1@org2.example.com"),
    ));
    let exec = Executor::new(
        ledger.clone(),
        ExecutorConfig::new().caller("User1@org1.example.com"),
    )
    .unwrap();

    for entry_id in ["e2", "e1"] {
        exec.invoke(
            "work",
            &[UID, "engineer", "20200101000000", "20190101000000", "20191231000000", entry_id],
        )
        .unwrap();
    }

    let own = exec.invoke::<&str>("listWork", &[]).unwrap();
    assert_eq!(json(&own).as_array().unwrap().len(), 2);
    let by_name = exec.invoke("listWork", &["User9@org2.example.com"]).unwrap();
    assert_eq!(own, by_name);
    assert!(json(&exec.invoke("listWork", &["org1"]).unwrap()).as_array().unwrap().is_empty());

    let log = AttributedLog::new(ledger.clone());
    let decoded: Vec<(String, String)> = log
        .list_all()
        .unwrap()
        .map(|hit| {
            let (member, entry_id, _) = AttributedLog::decode(&hit.unwrap()).unwrap();
            (member, entry_id)
        })
        .collect();
    assert_eq!(
        decoded,
        [("org2".to_string(), "e1".to_string()), ("org2".to_string(), "e2".to_string())]
    );
}

#[test]
fn test_work_log_argument_validation() {
    let exec = Executor::in_memory(ExecutorConfig::new().caller("org1")).unwrap();
    let rejection = exec
        .invoke(
            "work",
            &["short", "engineer", "20200101000000", "20190101000000", "20191231000000", "e1"],
        )
        .unwrap_err();
    assert_eq!(rejection.kind, ErrorKind::InvalidArgument);
}

// --- Sharing ---

#[test]
fn test_executor_shared_across_threads() {
    let exec = Arc::new(executor());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let exec = Arc::clone(&exec);
            thread::spawn(move || {
                for i in 0..25 {
                    let id = format!("t{}-{:02}", t, i);
                    exec.invoke("initWork", &[id.as_str(), "blue", "1", "tom"]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let moved = exec.invoke("transferWorksBasedOnIndex", &["blue", "jerry"]).unwrap();
    assert_eq!(moved, b"Transferred 100 blue works to jerry");
    let all = exec.invoke("getWorksByRange", &["", ""]).unwrap();
    assert_eq!(keys(&all).len(), 100);
}
