//! Fault injection for substrate writes
//!
//! Wraps any [`Substrate`] and fails chosen writes with a `Substrate` error,
//! so callers can observe how partial bulk operations behave.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use worksledger_core::{HistoryIter, KvIter, LedgerError, LedgerResult, Substrate};

/// A substrate wrapper that fails selected writes
#[derive(Debug)]
pub struct FaultInjector<S> {
    inner: S,
    failing_keys: Mutex<FxHashSet<String>>,
    writes_left: Mutex<Option<usize>>,
    writes: AtomicUsize,
}

impl<S: Substrate> FaultInjector<S> {
    /// Wrap a substrate with no faults armed
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing_keys: Mutex::new(FxHashSet::default()),
            writes_left: Mutex::new(None),
            writes: AtomicUsize::new(0),
        }
    }

    /// Fail every put or delete of `key`
    pub fn fail_key(&self, key: impl Into<String>) -> &Self {
        self.failing_keys.lock().insert(key.into());
        self
    }

    /// Allow `n` more successful writes, then fail all later ones
    pub fn fail_after_writes(&self, n: usize) -> &Self {
        *self.writes_left.lock() = Some(n);
        self
    }

    /// Disarm all faults
    pub fn clear(&self) {
        self.failing_keys.lock().clear();
        *self.writes_left.lock() = None;
    }

    /// Number of writes that reached the wrapped substrate
    pub fn successful_writes(&self) -> usize {
        self.writes.load(Ordering::Acquire)
    }

    /// The wrapped substrate
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, op: &str, key: &str) -> LedgerResult<()> {
        if self.failing_keys.lock().contains(key) {
            tracing::debug!(op, key, "injected fault on key");
            return Err(LedgerError::substrate(format!(
                "injected {} failure for {}",
                op, key
            )));
        }
        let mut budget = self.writes_left.lock();
        if let Some(left) = budget.as_mut() {
            if *left == 0 {
                tracing::debug!(op, key, "injected fault after write budget");
                return Err(LedgerError::substrate(format!(
                    "injected {} failure for {}: write budget exhausted",
                    op, key
                )));
            }
            *left -= 1;
        }
        Ok(())
    }
}

impl<S: Substrate> Substrate for FaultInjector<S> {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        self.check("put", key)?;
        self.inner.put(key, value)?;
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn delete(&self, key: &str) -> LedgerResult<()> {
        self.check("delete", key)?;
        self.inner.delete(key)?;
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> LedgerResult<KvIter<'_>> {
        self.inner.range_scan(start, end)
    }

    fn prefix_scan(&self, namespace: &str, leading: &[&str]) -> LedgerResult<KvIter<'_>> {
        self.inner.prefix_scan(namespace, leading)
    }

    fn predicate_query(&self, expression: &str) -> LedgerResult<KvIter<'_>> {
        self.inner.predicate_query(expression)
    }

    fn history(&self, key: &str) -> LedgerResult<HistoryIter<'_>> {
        self.inner.history(key)
    }

    fn caller_identity(&self) -> LedgerResult<String> {
        self.inner.caller_identity()
    }
}
