//! In-memory ledger substrate
//!
//! An ordered `BTreeMap` behind a `parking_lot::RwLock`, with a per-key
//! version log kept alongside. It stands in for the host ledger in tests,
//! the CLI, and anywhere a process-local ledger is enough.
//!
//! # Design
//!
//! - Ordered map: range and prefix scans are native BTreeMap ranges
//! - Snapshot iterators: scans copy matching pairs out before returning, so
//!   callers may write while still consuming an iterator
//! - Every put and delete of a present key gets a fresh transaction id and
//!   bumps the global version

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use uuid::Uuid;
use worksledger_core::{
    key, HistoryIter, KeyModification, KvIter, KvPair, LedgerError, LedgerResult, Substrate,
};

use crate::options::LedgerOptions;
use crate::selector::SelectorQuery;

/// Process-local ledger state
///
/// # Example
///
/// ```
/// use worksledger_core::Substrate;
/// use worksledger_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// ledger.put("w1", b"{}".to_vec()).unwrap();
/// assert_eq!(ledger.get("w1").unwrap(), Some(b"{}".to_vec()));
/// ```
pub struct MemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    history: RwLock<FxHashMap<String, Vec<KeyModification>>>,
    version: AtomicU64,
    options: LedgerOptions,
}

impl MemoryLedger {
    /// Create an empty ledger with default options
    pub fn new() -> Self {
        Self::with_options(LedgerOptions::default())
    }

    /// Create an empty ledger with the given options
    pub fn with_options(options: LedgerOptions) -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            history: RwLock::new(FxHashMap::default()),
            version: AtomicU64::new(0),
            options,
        }
    }

    /// Options this ledger was opened with
    pub fn options(&self) -> &LedgerOptions {
        &self.options
    }

    /// Number of committed writes and deletes so far
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Number of live keys, index entries included
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Whether no keys are live
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// All live pairs in key order
    pub fn dump(&self) -> Vec<KvPair> {
        self.state
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn record_version(&self, key: &str, value: Option<Vec<u8>>) {
        self.version.fetch_add(1, Ordering::AcqRel);
        if !self.options.history {
            return;
        }
        let modification = KeyModification {
            tx_id: Uuid::new_v4().simple().to_string(),
            value,
            timestamp: Utc::now(),
        };
        self.history
            .write()
            .entry(key.to_string())
            .or_default()
            .push(modification);
    }
}

fn snapshot_iter<'a>(pairs: Vec<KvPair>) -> KvIter<'a> {
    Box::new(pairs.into_iter().map(Ok))
}

impl Substrate for MemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.state.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        if key.is_empty() {
            return Err(LedgerError::invalid_argument("key must not be empty"));
        }
        let mut state = self.state.write();
        state.insert(key.to_string(), value.clone());
        // History is appended under the state guard so both see one order.
        self.record_version(key, Some(value));
        Ok(())
    }

    fn delete(&self, key: &str) -> LedgerResult<()> {
        let mut state = self.state.write();
        if state.remove(key).is_some() {
            self.record_version(key, None);
        }
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<KvIter<'_>> {
        if !end.is_empty() && start >= end {
            return Ok(snapshot_iter(Vec::new()));
        }
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };
        let pairs: Vec<KvPair> = self
            .state
            .read()
            .range::<str, _>((Bound::Included(start), upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(snapshot_iter(pairs))
    }

    fn prefix_scan(&self, namespace: &str, leading: &[&str]) -> LedgerResult<KvIter<'_>> {
        let start = key::prefix(namespace, leading)?;
        let end = key::prefix_end(&start);
        self.range_scan(&start, &end)
    }

    fn predicate_query(&self, expression: &str) -> LedgerResult<KvIter<'_>> {
        if !self.options.rich_query {
            return Err(LedgerError::QueryUnsupported);
        }
        let query = SelectorQuery::parse(expression)?;
        let hits = {
            let state = self.state.read();
            query.execute(state.iter())
        };
        tracing::debug!(expression, hits = hits.len(), "selector query evaluated");
        Ok(snapshot_iter(hits))
    }

    fn history(&self, key: &str) -> LedgerResult<HistoryIter<'_>> {
        if !self.options.history {
            return Ok(Box::new(std::iter::empty()));
        }
        let versions = self.history.read().get(key).cloned().unwrap_or_default();
        Ok(Box::new(versions.into_iter().map(Ok)))
    }

    fn caller_identity(&self) -> LedgerResult<String> {
        self.options
            .caller
            .clone()
            .ok_or_else(|| LedgerError::invalid_argument("no caller identity configured"))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLedger")
            .field("entries", &self.len())
            .field("version", &self.version())
            .field("options", &self.options)
            .finish()
    }
}
