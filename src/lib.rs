//! worksledger: indexed work-record management over an ordered key-value
//! ledger.
//!
//! This crate re-exports the public surface of the workspace crates:
//!
//! - [`Executor`]: named command invocation, the dispatch boundary
//! - [`RecordStore`], [`RangeScanner`], [`QueryExecutor`], [`HistoryReader`],
//!   [`AttributedLog`]: the record primitives
//! - [`Substrate`]: the host ledger boundary, with [`MemoryLedger`] as the
//!   in-process implementation
//!
//! # Example
//!
//! ```
//! use worksledger::{Executor, ExecutorConfig};
//!
//! let ledger = Executor::in_memory(ExecutorConfig::default()).unwrap();
//! ledger.invoke("initWork", &["w1", "blue", "35", "tom"]).unwrap();
//! let moved = ledger
//!     .invoke("transferWorksBasedOnIndex", &["blue", "jerry"])
//!     .unwrap();
//! assert_eq!(moved, b"Transferred 1 blue works to jerry");
//! ```

#![warn(missing_docs)]

// ============================================================================
// Core types
// ============================================================================

pub use worksledger_core::key;
pub use worksledger_core::{
    ErrorKind, HistoryEntry, HistoryIter, KeyModification, KeyedRecord, KvIter, KvPair,
    LedgerError, LedgerResult, Record, Substrate, INDEX_MARKER, WORK_DOC_TYPE,
};

// ============================================================================
// Substrates
// ============================================================================

pub use worksledger_storage::{FaultInjector, LedgerOptions, MemoryLedger};

// ============================================================================
// Primitives
// ============================================================================

pub use worksledger_primitives::{
    member_name, AttributedLog, HistoryReader, IndexPolicy, IndexSpec, QueryExecutor,
    RangeScanner, RecordStore, WorkLogEntry,
};

// ============================================================================
// Dispatch
// ============================================================================

pub use worksledger_executor::{
    Command, CommandRegistry, ConfigError, Executor, ExecutorConfig, InvocationContext, Output,
    Rejection, SchemaProfile,
};
