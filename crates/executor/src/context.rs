//! Per-executor invocation context.
//!
//! Bundles the primitives every handler needs, built once from the
//! substrate and configuration. Handlers receive it by shared reference and
//! never mutate it.

use std::sync::Arc;

use worksledger_core::{LedgerResult, Substrate};
use worksledger_primitives::{
    member_name, AttributedLog, HistoryReader, QueryExecutor, RangeScanner, RecordStore,
};

use crate::config::ExecutorConfig;
use crate::schema::SchemaProfile;

/// Handles passed to every command handler
#[derive(Clone)]
pub struct InvocationContext {
    /// Active schema
    pub schema: SchemaProfile,
    /// Record store with the schema's index
    pub records: RecordStore,
    /// Range and index-prefix scans
    pub scanner: RangeScanner,
    /// Predicate queries
    pub queries: QueryExecutor,
    /// Version history
    pub history: HistoryReader,
    /// Caller-attributed work log
    pub worklog: AttributedLog,
    substrate: Arc<dyn Substrate>,
    fallback_caller: Option<String>,
}

impl InvocationContext {
    /// Build the context for a substrate and configuration
    pub fn new(substrate: Arc<dyn Substrate>, config: &ExecutorConfig) -> Self {
        Self {
            schema: config.schema,
            records: RecordStore::new(substrate.clone(), config.schema.index_spec())
                .with_policy(config.index_policy),
            scanner: RangeScanner::new(substrate.clone()),
            queries: QueryExecutor::new(substrate.clone()),
            history: HistoryReader::new(substrate.clone()),
            worklog: AttributedLog::new(substrate.clone()),
            substrate,
            fallback_caller: config.caller.clone(),
        }
    }

    /// Caller identity from the substrate, else the configured one
    pub fn caller_identity(&self) -> LedgerResult<String> {
        match self.substrate.caller_identity() {
            Ok(identity) => Ok(identity),
            Err(e) => self.fallback_caller.clone().ok_or(e),
        }
    }

    /// Member name of the caller
    pub fn caller_member(&self) -> LedgerResult<String> {
        member_name(&self.caller_identity()?)
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("schema", &self.schema)
            .field("records", &self.records)
            .field("fallback_caller", &self.fallback_caller)
            .finish_non_exhaustive()
    }
}
