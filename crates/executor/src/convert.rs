//! Error conversion at the dispatch boundary.
//!
//! Callers outside the executor never see a [`LedgerError`]; they see a
//! [`Rejection`] carrying the failure kind and a human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use worksledger_core::{ErrorKind, LedgerError};

/// Structured failure returned to the invoker
///
/// Serializes as `{"kind": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct Rejection {
    /// Failure kind
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl Rejection {
    /// Build a rejection directly
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// JSON form, as written to clients
    pub fn to_json(&self) -> String {
        serde_json::json!({ "kind": self.kind, "message": self.message }).to_string()
    }
}

impl From<LedgerError> for Rejection {
    fn from(err: LedgerError) -> Self {
        Rejection {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Convert a ledger result into a rejection-carrying result.
pub fn convert_result<T>(result: Result<T, LedgerError>) -> Result<T, Rejection> {
    result.map_err(Rejection::from)
}
