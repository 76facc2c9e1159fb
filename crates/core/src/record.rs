//! Record, query-hit and history types
//!
//! A [`Record`] is stored as a flat JSON object:
//!
//! ```text
//! {"docType":"work","uid":"w1","workstartdate":"blue","workenddate":35,"workexperience":"tom"}
//! ```
//!
//! `docType` and `uid` are fixed; every other member is a domain field held
//! in `fields` in insertion-independent (sorted) order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LedgerError, LedgerResult};

/// Object-type discriminator written into every work record.
pub const WORK_DOC_TYPE: &str = "work";

/// One-byte sentinel stored as the value of every index entry.
pub const INDEX_MARKER: [u8; 1] = [0x00];

/// A work record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Object-type discriminator
    #[serde(rename = "docType")]
    pub doc_type: String,
    /// Primary key
    pub uid: String,
    /// Domain fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a work record with no fields
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            doc_type: WORK_DOC_TYPE.to_string(),
            uid: uid.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Field value, if present
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field rendered as the string used inside index keys
    ///
    /// Strings are used as-is; numbers and booleans use their JSON text.
    pub fn field_text(&self, name: &str) -> LedgerResult<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(LedgerError::serialization(format!(
                "field {} of {} is not a scalar: {}",
                name, self.uid, other
            ))),
            None => Err(LedgerError::serialization(format!(
                "record {} has no field {}",
                self.uid, name
            ))),
        }
    }

    /// Serialize to the stored JSON bytes
    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from stored JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LedgerError::serialization(format!("failed to decode work JSON: {}", e)))
    }
}

/// One `(key, record)` pair from a range scan or predicate query
///
/// Serializes as `{"Key": ..., "Record": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRecord {
    /// Primary key the record is stored under
    #[serde(rename = "Key")]
    pub key: String,
    /// The stored JSON document
    #[serde(rename = "Record")]
    pub record: Value,
}

/// One historic version of a key
///
/// Serializes as `{"TxId": ..., "Value": ..., "Timestamp": ..., "IsDelete": ...}`.
/// A delete is a tombstone: `is_delete` is set and `value` is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Transaction that wrote this version
    #[serde(rename = "TxId")]
    pub tx_id: String,
    /// The value written, `None` for a delete
    #[serde(rename = "Value")]
    pub value: Option<Value>,
    /// Commit timestamp
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Whether this version is a delete
    #[serde(rename = "IsDelete")]
    pub is_delete: bool,
}
