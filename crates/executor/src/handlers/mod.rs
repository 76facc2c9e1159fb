//! Command handlers.
//!
//! Each handler takes the [`InvocationContext`](crate::InvocationContext)
//! and the already-validated command fields, calls the primitives and
//! returns an [`Output`](crate::Output).

pub mod history;
pub mod query;
pub mod scan;
pub mod worklog;
pub mod works;
