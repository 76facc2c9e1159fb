//! Command results.

use serde_json::Value;
use worksledger_core::{HistoryEntry, KeyedRecord, LedgerResult, Record};

/// Successful result of a command
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// No payload
    Unit,
    /// A single work record
    Record(Record),
    /// Scan, query or work log hits as `{"Key", "Record"}` pairs
    Records(Vec<KeyedRecord>),
    /// Version history of one record
    History(Vec<HistoryEntry>),
    /// Plain-text confirmation
    Text(String),
}

impl Output {
    /// Payload bytes returned to the caller
    ///
    /// `Unit` is empty, `Text` is UTF-8, everything else is JSON.
    pub fn to_payload(&self) -> LedgerResult<Vec<u8>> {
        Ok(match self {
            Output::Unit => Vec::new(),
            Output::Record(record) => record.to_bytes()?,
            Output::Records(hits) => serde_json::to_vec(hits)?,
            Output::History(entries) => serde_json::to_vec(entries)?,
            Output::Text(text) => text.clone().into_bytes(),
        })
    }

    /// The payload as JSON, where it is JSON
    pub fn to_json(&self) -> LedgerResult<Option<Value>> {
        Ok(match self {
            Output::Unit | Output::Text(_) => None,
            Output::Record(record) => Some(serde_json::to_value(record)?),
            Output::Records(hits) => Some(serde_json::to_value(hits)?),
            Output::History(entries) => Some(serde_json::to_value(entries)?),
        })
    }
}
