//! Record store primitive
//!
//! Stateless facade over a [`Substrate`]. Owns the primary key space: every
//! write of a work record goes through here, together with the maintenance
//! of its one secondary-index entry.
//!
//! # Design
//!
//! RecordStore holds only an `Arc<dyn Substrate>` plus the index layout and
//! policy. Multiple instances over the same substrate see the same data and
//! Clone is cheap.
//!
//! # Index maintenance
//!
//! | Operation | Primary | Index |
//! |-----------|---------|-------|
//! | `create` | put | put `CompositeKey(index, value, id) = 0x00` |
//! | `delete` | delete | delete the entry for the stored value |
//! | `update_field` | put | kept under [`IndexPolicy::Preserve`], moved under `Rekey` |
//!
//! The two writes of each operation are not atomic from this side. When the
//! primary write succeeded and the index write did not, the operation fails
//! with `IndexInconsistency` naming the index key left behind or missing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use worksledger_core::{key, LedgerError, LedgerResult, Record, Substrate, INDEX_MARKER};

/// Name and source field of the secondary index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Composite-key namespace, e.g. `workstartdate~uid`
    pub name: String,
    /// Record field whose value leads the index key
    pub field: String,
}

impl IndexSpec {
    /// Create an index spec
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// What an update of the indexed field does to the index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Leave the old entry in place; the index drifts from the record
    #[default]
    Preserve,
    /// Delete the old entry and write one for the new value
    Rekey,
}

/// Record store primitive
#[derive(Clone)]
pub struct RecordStore {
    substrate: Arc<dyn Substrate>,
    index: IndexSpec,
    policy: IndexPolicy,
}

impl RecordStore {
    /// Create a record store with the default [`IndexPolicy::Preserve`]
    pub fn new(substrate: Arc<dyn Substrate>, index: IndexSpec) -> Self {
        Self {
            substrate,
            index,
            policy: IndexPolicy::default(),
        }
    }

    /// Builder-style policy setter
    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Index layout
    pub fn index(&self) -> &IndexSpec {
        &self.index
    }

    /// Index policy
    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Index key for a record in its current state
    pub fn index_key(&self, record: &Record) -> LedgerResult<String> {
        let value = record.field_text(&self.index.field)?;
        key::encode(&self.index.name, &[value.as_str(), record.uid.as_str()])
    }

    /// Whether a record with this id is stored
    pub fn exists(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.substrate.get(id)?.is_some())
    }

    /// Store a new record and its index entry
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the id is empty or starts with U+0000
    /// - `AlreadyExists` if the id is taken; nothing is written
    /// - `IndexInconsistency` if the index write failed after the record was stored
    pub fn create(&self, record: &Record) -> LedgerResult<()> {
        if record.uid.is_empty() {
            return Err(LedgerError::invalid_argument("uid must be a non-empty string"));
        }
        key::validate_simple_key(&record.uid)?;
        if self.exists(&record.uid)? {
            return Err(LedgerError::already_exists(&record.uid));
        }

        // Computed up front so a bad index value writes nothing.
        let index_key = self.index_key(record)?;
        self.substrate.put(&record.uid, record.to_bytes()?)?;
        self.substrate
            .put(&index_key, INDEX_MARKER.to_vec())
            .map_err(|e| {
                self.inconsistency(&record.uid, &index_key, "index entry not written", e)
            })?;

        tracing::debug!(uid = %record.uid, index = %self.index.name, "work created");
        Ok(())
    }

    /// Load a record
    pub fn read(&self, id: &str) -> LedgerResult<Record> {
        match self.substrate.get(id)? {
            Some(bytes) => Record::from_bytes(&bytes),
            None => Err(LedgerError::not_found(id)),
        }
    }

    /// Remove a record and its index entry, returning the removed record
    ///
    /// # Errors
    ///
    /// - `NotFound` if absent
    /// - `IndexInconsistency` if the record was removed but its index entry
    ///   was not; the error carries the orphaned key
    pub fn delete(&self, id: &str) -> LedgerResult<Record> {
        let record = self.read(id)?;
        let index_key = self.index_key(&record)?;

        self.substrate.delete(id)?;
        self.substrate
            .delete(&index_key)
            .map_err(|e| self.inconsistency(id, &index_key, "orphaned index entry", e))?;

        tracing::debug!(uid = %id, index = %self.index.name, "work deleted");
        Ok(record)
    }

    /// Read-modify-write one field, returning the updated record
    ///
    /// Under [`IndexPolicy::Preserve`] the index entry is left as it was,
    /// even when `field` is the indexed field. A new indexed value must
    /// still form a valid index key; otherwise nothing is written.
    pub fn update_field(&self, id: &str, field: &str, value: Value) -> LedgerResult<Record> {
        if field == "docType" || field == "uid" {
            return Err(LedgerError::invalid_argument(format!(
                "field {} cannot be updated",
                field
            )));
        }
        let mut record = self.read(id)?;
        let old_index_key = self.index_key(&record).ok();

        record.fields.insert(field.to_string(), value);
        let new_index_key = if field == self.index.field {
            Some(self.index_key(&record)?)
        } else {
            None
        };
        self.substrate.put(id, record.to_bytes()?)?;

        if let (Some(new), IndexPolicy::Rekey) = (new_index_key, self.policy) {
            self.rekey(id, old_index_key, new)?;
        }

        tracing::debug!(uid = %id, field, "work updated");
        Ok(record)
    }

    fn rekey(
        &self,
        id: &str,
        old_index_key: Option<String>,
        new_index_key: String,
    ) -> LedgerResult<()> {
        if old_index_key.as_deref() == Some(new_index_key.as_str()) {
            return Ok(());
        }
        if let Some(old) = old_index_key {
            self.substrate
                .delete(&old)
                .map_err(|e| self.inconsistency(id, &old, "stale index entry not removed", e))?;
        }
        self.substrate
            .put(&new_index_key, INDEX_MARKER.to_vec())
            .map_err(|e| self.inconsistency(id, &new_index_key, "index entry not written", e))
    }

    fn inconsistency(
        &self,
        id: &str,
        index_key: &str,
        what: &str,
        cause: LedgerError,
    ) -> LedgerError {
        tracing::warn!(
            uid = %id,
            index = %self.index.name,
            error = %cause,
            "{}", what
        );
        LedgerError::index_inconsistency(id, index_key, format!("{}: {}", what, cause))
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("index", &self.index)
            .field("policy", &self.policy)
            .finish()
    }
}
