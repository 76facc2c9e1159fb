//! Predicate query primitive
//!
//! Passes an opaque query expression to the substrate and normalizes the
//! hits into `{"Key", "Record"}` pairs.
//!
//! # Phantom reads
//!
//! The host does not re-execute predicate queries at commit time, so a
//! result set may differ from what the same query would return when the
//! transaction commits. Use query results for reporting only. State-changing
//! bulk operations take their ids from [`RangeScanner`](crate::RangeScanner).

use std::sync::Arc;

use serde_json::json;
use worksledger_core::{LedgerResult, Substrate, WORK_DOC_TYPE};

use crate::scan::{keyed_record, KeyedIter};

/// Query document matching work records whose `field` equals the
/// lower-cased `value`
pub fn field_query(field: &str, value: &str) -> String {
    let mut selector = serde_json::Map::new();
    selector.insert("docType".to_string(), json!(WORK_DOC_TYPE));
    selector.insert(field.to_string(), json!(value.to_lowercase()));
    json!({ "selector": selector }).to_string()
}

/// Predicate query primitive
#[derive(Clone)]
pub struct QueryExecutor {
    substrate: Arc<dyn Substrate>,
}

impl QueryExecutor {
    /// Create a query executor over a substrate
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self { substrate }
    }

    /// Run `expression` verbatim
    ///
    /// # Errors
    ///
    /// - `QueryUnsupported` when the substrate has no query engine
    /// - `QuerySyntax` when the substrate rejects the expression
    pub fn query(&self, expression: &str) -> LedgerResult<KeyedIter<'_>> {
        tracing::debug!(expression, "predicate query");
        let iter = self.substrate.predicate_query(expression)?;
        Ok(Box::new(iter.map(|item| {
            let (k, v) = item?;
            keyed_record(k, &v)
        })))
    }

    /// Work records whose `field` equals `value` (lower-cased)
    pub fn query_by_field(&self, field: &str, value: &str) -> LedgerResult<KeyedIter<'_>> {
        self.query(&field_query(field, value))
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor").finish_non_exhaustive()
    }
}
