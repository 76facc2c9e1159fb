//! Primitives layer for worksledger
//!
//! This crate implements the record-management primitives:
//! - RecordStore: primary records and their secondary-index entry
//! - RangeScanner: key-range and index-prefix scans, bulk transfer
//! - QueryExecutor: predicate queries (reporting only)
//! - HistoryReader: per-record version history
//! - AttributedLog: caller-attributed work log
//!
//! All primitives are stateless facades over an `Arc<dyn Substrate>`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributed;
pub mod history;
pub mod query;
pub mod records;
pub mod scan;

pub use attributed::{member_name, AttributedLog, WorkLogEntry, WORK_LOG_NAMESPACE};
pub use history::{HistoryEntryIter, HistoryReader};
pub use query::{field_query, QueryExecutor};
pub use records::{IndexPolicy, IndexSpec, RecordStore};
pub use scan::{IdIter, KeyedIter, RangeScanner};
