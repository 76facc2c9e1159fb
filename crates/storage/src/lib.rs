//! Storage layer for worksledger
//!
//! Provides [`MemoryLedger`], a process-local implementation of the
//! [`Substrate`](worksledger_core::Substrate) boundary with ordered scans,
//! selector queries and per-key history, plus [`FaultInjector`] for
//! exercising failure paths.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod faults;
pub mod memory;
pub mod options;
pub mod selector;

pub use faults::FaultInjector;
pub use memory::MemoryLedger;
pub use options::LedgerOptions;
pub use selector::{SelectorQuery, SortOrder};
