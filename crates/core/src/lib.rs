//! Core types for worksledger
//!
//! This crate defines the pieces every other crate builds on:
//! - Error taxonomy: [`LedgerError`] and its [`ErrorKind`]
//! - Composite key codec: [`key`]
//! - Record and history types: [`Record`], [`KeyedRecord`], [`HistoryEntry`]
//! - The host boundary: [`Substrate`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod record;
pub mod substrate;

pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use record::{HistoryEntry, KeyedRecord, Record, INDEX_MARKER, WORK_DOC_TYPE};
pub use substrate::{HistoryIter, KeyModification, KvIter, KvPair, Substrate};
