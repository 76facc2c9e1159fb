//! Caller-attributed work log
//!
//! Work log entries are keyed by the invoking member and an entry id:
//! `CompositeKey("Work", [member, entryId])`. Listing a member's entries is
//! a prefix scan over that member's segment.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use worksledger_core::{key, KeyedRecord, LedgerError, LedgerResult, Substrate};

use crate::scan::{keyed_record, KeyedIter};

/// Composite-key namespace of work log entries
pub const WORK_LOG_NAMESPACE: &str = "Work";

const MEMBER_DOMAIN_SUFFIX: &str = ".example.com";

/// One work log entry as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// Write time, Unix seconds
    pub timestamp: i64,
    /// Subject of the entry
    pub uid: String,
    /// Work experience description
    pub workexperience: String,
    /// Application date
    #[serde(rename = "applyDate")]
    pub apply_date: String,
    /// Start of the work period
    #[serde(rename = "workStartDate")]
    pub work_start_date: String,
    /// End of the work period
    #[serde(rename = "workEndDate")]
    pub work_end_date: String,
}

impl WorkLogEntry {
    /// Entry stamped with the current time
    pub fn new(
        uid: impl Into<String>,
        workexperience: impl Into<String>,
        apply_date: impl Into<String>,
        work_start_date: impl Into<String>,
        work_end_date: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            uid: uid.into(),
            workexperience: workexperience.into(),
            apply_date: apply_date.into(),
            work_start_date: work_start_date.into(),
            work_end_date: work_end_date.into(),
        }
    }
}

/// Member name from a caller common name
///
/// `User1@org1.example.com` yields `org1`. Names without an `@` followed by
/// a `.example.com` suffix are used as given, trimmed.
pub fn member_name(identity: &str) -> LedgerResult<String> {
    let identity = identity.trim();
    if identity.is_empty() {
        return Err(LedgerError::invalid_argument("caller identity is empty"));
    }
    let member = match (identity.find('@'), identity.rfind(MEMBER_DOMAIN_SUFFIX)) {
        (Some(at), Some(suffix)) if at < suffix => &identity[at + 1..suffix],
        _ => identity,
    };
    if member.is_empty() {
        return Err(LedgerError::invalid_argument(format!(
            "caller identity {:?} has an empty member name",
            identity
        )));
    }
    Ok(member.to_string())
}

/// Attributed work log primitive
#[derive(Clone)]
pub struct AttributedLog {
    substrate: Arc<dyn Substrate>,
}

impl AttributedLog {
    /// Create a work log over a substrate
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self { substrate }
    }

    /// Store `entry` for `member` under `entry_id`, returning the key written
    ///
    /// Writing an existing `(member, entry_id)` replaces it.
    pub fn record(
        &self,
        member: &str,
        entry_id: &str,
        entry: &WorkLogEntry,
    ) -> LedgerResult<String> {
        if entry_id.is_empty() {
            return Err(LedgerError::invalid_argument("entry id must be a non-empty string"));
        }
        let key = key::encode(WORK_LOG_NAMESPACE, &[member, entry_id])?;
        self.substrate.put(&key, serde_json::to_vec(entry)?)?;
        tracing::debug!(member, entry_id, uid = %entry.uid, "work log entry recorded");
        Ok(key)
    }

    /// Entries of `member`, ascending by entry id
    pub fn list(&self, member: &str) -> LedgerResult<KeyedIter<'_>> {
        let iter = self.substrate.prefix_scan(WORK_LOG_NAMESPACE, &[member])?;
        Ok(Box::new(iter.map(|item| {
            let (k, v) = item?;
            keyed_record(k, &v)
        })))
    }

    /// Entries of every member, ascending by member then entry id
    pub fn list_all(&self) -> LedgerResult<KeyedIter<'_>> {
        let iter = self.substrate.prefix_scan(WORK_LOG_NAMESPACE, &[])?;
        Ok(Box::new(iter.map(|item| {
            let (k, v) = item?;
            keyed_record(k, &v)
        })))
    }

    /// Decode one listed hit back into its member, entry id and entry
    pub fn decode(hit: &KeyedRecord) -> LedgerResult<(String, String, WorkLogEntry)> {
        let segments = key::decode_in(WORK_LOG_NAMESPACE, &hit.key)?;
        let [member, entry_id]: [String; 2] = segments.try_into().map_err(|_| {
            LedgerError::malformed_key(&hit.key, "work log key must have two segments")
        })?;
        let entry = serde_json::from_value(hit.record.clone())?;
        Ok((member, entry_id, entry))
    }
}

impl std::fmt::Debug for AttributedLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributedLog").finish_non_exhaustive()
    }
}
