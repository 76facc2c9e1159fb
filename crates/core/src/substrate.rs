//! Ledger substrate boundary
//!
//! The substrate is the host's ordered key-value state: point reads and
//! writes, ascending range iteration, partial-composite-key iteration, an
//! optional free-form predicate query, and per-key version history. Its
//! transactional, consensus and isolation behaviour is owned by the host.
//!
//! ## Contract
//!
//! | Operation | Ordering | Reproducible at commit |
//! |-----------|----------|------------------------|
//! | `range_scan` | ascending by key | yes |
//! | `prefix_scan` | ascending by key | yes |
//! | `predicate_query` | substrate-defined | **no** (phantom reads) |
//! | `history` | oldest first | n/a |
//!
//! Iterators are lazy, finite and one-shot. Re-issue the call for another
//! pass. Dropping an iterator early is the only cancellation.

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::key;

/// A raw `(key, value)` pair as stored
pub type KvPair = (String, Vec<u8>);

/// Lazy iterator over stored pairs
pub type KvIter<'a> = Box<dyn Iterator<Item = LedgerResult<KvPair>> + 'a>;

/// Lazy iterator over historic versions
pub type HistoryIter<'a> = Box<dyn Iterator<Item = LedgerResult<KeyModification>> + 'a>;

/// One historic version of a key as reported by the substrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Transaction identifier
    pub tx_id: String,
    /// Value written, `None` when the version is a delete
    pub value: Option<Vec<u8>>,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl KeyModification {
    /// Whether this version is a delete
    pub fn is_delete(&self) -> bool {
        self.value.is_none()
    }
}

/// Host-provided ordered key-value state
///
/// All methods take `&self`; implementations use interior mutability. An
/// implementation must allow writes while one of its own iterators is still
/// being consumed, because bulk operations update records as they scan.
pub trait Substrate: Send + Sync {
    /// Read a key; `None` when absent
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Write a key
    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()>;

    /// Delete a key; deleting an absent key is not an error
    fn delete(&self, key: &str) -> LedgerResult<()>;

    /// Ascending iteration over `[start, end)`; an empty `end` is unbounded
    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<KvIter<'_>>;

    /// Ascending iteration over composite keys in `namespace` whose leading
    /// segments equal `leading`
    fn prefix_scan(&self, namespace: &str, leading: &[&str]) -> LedgerResult<KvIter<'_>> {
        let start = key::prefix(namespace, leading)?;
        let end = key::prefix_end(&start);
        self.range_scan(&start, &end)
    }

    /// Evaluate a free-form predicate expression
    ///
    /// The result set is not guaranteed to be the same if recomputed later.
    /// Substrates without a query engine keep the default, which fails
    /// with `QueryUnsupported`.
    fn predicate_query(&self, expression: &str) -> LedgerResult<KvIter<'_>> {
        let _ = expression;
        Err(LedgerError::QueryUnsupported)
    }

    /// Version log of `key`, oldest first, tombstones included
    fn history(&self, key: &str) -> LedgerResult<HistoryIter<'_>>;

    /// Identity of the invoking client, as presented to the host
    fn caller_identity(&self) -> LedgerResult<String> {
        Err(LedgerError::invalid_argument(
            "substrate does not expose a caller identity",
        ))
    }
}
