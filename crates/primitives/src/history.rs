//! History reader primitive
//!
//! Normalizes the substrate's per-key version log into [`HistoryEntry`]
//! values, oldest first. A delete is kept as a tombstone with a null value.
//! Payloads that are not JSON are reported as `{"$bytes": "<base64>"}`.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use worksledger_core::{HistoryEntry, KeyModification, LedgerResult, Substrate};

/// Lazy iterator over normalized history entries
pub type HistoryEntryIter<'a> = Box<dyn Iterator<Item = LedgerResult<HistoryEntry>> + 'a>;

fn decode_value(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| json!({ "$bytes": STANDARD.encode(bytes) }))
}

fn normalize(m: KeyModification) -> HistoryEntry {
    let is_delete = m.is_delete();
    HistoryEntry {
        tx_id: m.tx_id,
        value: m.value.as_deref().map(decode_value),
        timestamp: m.timestamp,
        is_delete,
    }
}

/// History reader primitive
#[derive(Clone)]
pub struct HistoryReader {
    substrate: Arc<dyn Substrate>,
}

impl HistoryReader {
    /// Create a history reader over a substrate
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self { substrate }
    }

    /// Version log of `id`, oldest first
    ///
    /// An id that was never written yields an empty sequence.
    pub fn history(&self, id: &str) -> LedgerResult<HistoryEntryIter<'_>> {
        let iter = self.substrate.history(id)?;
        Ok(Box::new(iter.map(|item| item.map(normalize))))
    }
}

impl std::fmt::Debug for HistoryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryReader").finish_non_exhaustive()
    }
}
