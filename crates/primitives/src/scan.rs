//! Range and index-prefix scans
//!
//! RangeScanner walks the substrate in key order. Unlike predicate queries,
//! range and prefix scans are re-checked by the host at commit time, which
//! makes them the only safe source of record ids for state-changing bulk
//! operations such as [`RangeScanner::transfer_by_index`].

use std::sync::Arc;

use serde_json::Value;
use worksledger_core::{key, KeyedRecord, LedgerError, LedgerResult, Substrate};

use crate::records::RecordStore;

/// Lazy iterator over `(key, record)` hits
pub type KeyedIter<'a> = Box<dyn Iterator<Item = LedgerResult<KeyedRecord>> + 'a>;

/// Lazy iterator over record ids recovered from index keys
pub type IdIter<'a> = Box<dyn Iterator<Item = LedgerResult<String>> + 'a>;

/// Decode a stored value into the JSON reported for a hit
pub(crate) fn keyed_record(key: String, bytes: &[u8]) -> LedgerResult<KeyedRecord> {
    let record: Value = serde_json::from_slice(bytes).map_err(|e| {
        LedgerError::serialization(format!("value under {:?} is not JSON: {}", key, e))
    })?;
    Ok(KeyedRecord { key, record })
}

/// Range scan primitive
#[derive(Clone)]
pub struct RangeScanner {
    substrate: Arc<dyn Substrate>,
}

impl RangeScanner {
    /// Create a scanner over a substrate
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self { substrate }
    }

    /// Records with primary keys in `[start, end)`, ascending
    ///
    /// An empty `end` is unbounded. Index entries share the substrate but
    /// never appear here.
    pub fn scan_range(&self, start: &str, end: &str) -> LedgerResult<KeyedIter<'_>> {
        let iter = self.substrate.range_scan(start, end)?;
        Ok(Box::new(iter.filter_map(|item| match item {
            Ok((k, _)) if key::is_composite(&k) => None,
            Ok((k, v)) => Some(keyed_record(k, &v)),
            Err(e) => Some(Err(e)),
        })))
    }

    /// Record ids from the index `index_name` whose leading segments match
    ///
    /// The id is the trailing segment of each index key.
    pub fn scan_by_index_prefix(
        &self,
        index_name: &str,
        leading: &[&str],
    ) -> LedgerResult<IdIter<'_>> {
        let iter = self.substrate.prefix_scan(index_name, leading)?;
        let namespace = index_name.to_string();
        Ok(Box::new(iter.map(move |item| {
            let (k, _) = item?;
            let mut segments = key::decode_in(&namespace, &k)?;
            segments
                .pop()
                .ok_or_else(|| LedgerError::malformed_key(k, "index key has no segments"))
        })))
    }

    /// Set `field` to `value` on every record indexed under `index_value`
    ///
    /// Records are updated in index-key order through `store`, one at a
    /// time. Returns the number of records transferred.
    ///
    /// # Errors
    ///
    /// The first failing update stops the transfer and is returned as
    /// `TransferAborted`, carrying the count already transferred and the
    /// failing record id. Updates before it stay applied. Errors from the
    /// index scan itself are returned unwrapped.
    pub fn transfer_by_index(
        &self,
        store: &RecordStore,
        index_value: &str,
        field: &str,
        value: &Value,
    ) -> LedgerResult<usize> {
        let index_name = store.index().name.clone();
        let mut transferred = 0;
        for id in self.scan_by_index_prefix(&index_name, &[index_value])? {
            let id = id?;
            tracing::debug!(uid = %id, index = %index_name, "transferring work");
            if let Err(e) = store.update_field(&id, field, value.clone()) {
                tracing::warn!(
                    uid = %id,
                    transferred,
                    error = %e,
                    "bulk transfer aborted"
                );
                return Err(LedgerError::transfer_aborted(transferred, id, e));
            }
            transferred += 1;
        }
        Ok(transferred)
    }
}

impl std::fmt::Debug for RangeScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScanner").finish_non_exhaustive()
    }
}
