//! Error taxonomy for ledger record operations
//!
//! Every failure surfaced by this workspace is a [`LedgerError`]. Callers
//! branch on [`LedgerError::kind`] rather than on message text; the message
//! is for humans.
//!
//! Nothing here is retried internally. Retry, if any, belongs to the host or
//! the client.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Discriminant of a [`LedgerError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Wrong arity, blank required field, non-numeric numeric field,
    /// wrong fixed length
    InvalidArgument,
    /// A record with this identifier already exists
    AlreadyExists,
    /// No record with this identifier
    NotFound,
    /// A composite key did not have the expected structure
    MalformedKey,
    /// A stored value could not be encoded or decoded
    #[serde(rename = "SerializationError")]
    Serialization,
    /// An index mutation failed after the primary mutation succeeded
    IndexInconsistency,
    /// The substrate rejected a predicate expression
    #[serde(rename = "QuerySyntaxError")]
    QuerySyntax,
    /// The substrate has no predicate-query capability
    QueryUnsupported,
    /// The host substrate failed a primitive operation
    #[serde(rename = "SubstrateError")]
    Substrate,
    /// No handler is registered for the command name
    UnknownCommand,
}

impl ErrorKind {
    /// Stable name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::MalformedKey => "MalformedKey",
            ErrorKind::Serialization => "SerializationError",
            ErrorKind::IndexInconsistency => "IndexInconsistency",
            ErrorKind::QuerySyntax => "QuerySyntaxError",
            ErrorKind::QueryUnsupported => "QueryUnsupported",
            ErrorKind::Substrate => "SubstrateError",
            ErrorKind::UnknownCommand => "UnknownCommand",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error for record, index, scan, query and history operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Argument failed edge validation
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong
        message: String,
    },

    /// Create on an identifier that is already present
    #[error("this work already exists: {id}")]
    AlreadyExists {
        /// The conflicting identifier
        id: String,
    },

    /// Read / update / delete of an absent identifier
    #[error("work does not exist: {id}")]
    NotFound {
        /// The missing identifier
        id: String,
    },

    /// Composite key did not decode
    #[error("malformed composite key {key:?}: {reason}")]
    MalformedKey {
        /// The offending key, debug-escaped in the message
        key: String,
        /// What was wrong with it
        reason: String,
    },

    /// JSON encode/decode of a stored value failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Underlying serde message
        message: String,
    },

    /// The primary entry changed but its index entry could not follow
    #[error("index inconsistency on {id}: index key {index_key:?} left behind: {reason}")]
    IndexInconsistency {
        /// Record whose index is out of step
        id: String,
        /// The index key that is now orphaned or missing
        index_key: String,
        /// Underlying substrate failure
        reason: String,
    },

    /// Malformed predicate expression, as reported by the substrate
    #[error("query syntax error: {message}")]
    QuerySyntax {
        /// Substrate-provided detail
        message: String,
    },

    /// Substrate cannot evaluate predicate expressions
    #[error("predicate query is not supported by this state database")]
    QueryUnsupported,

    /// Host substrate failure on a primitive operation
    #[error("substrate error: {message}")]
    Substrate {
        /// Host-provided detail
        message: String,
    },

    /// Command name has no registered handler
    #[error("received unknown function invocation: {name}")]
    UnknownCommand {
        /// The unrecognised command name
        name: String,
    },

    /// Bulk transfer stopped at the first failing record
    ///
    /// `transferred` records before `record_id` already carry the new value;
    /// `record_id` and everything after it do not.
    #[error("transfer failed after {transferred} works at {record_id}: {source}")]
    TransferAborted {
        /// Records successfully updated before the failure
        transferred: usize,
        /// The record whose update failed
        record_id: String,
        /// Why it failed
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(id: impl Into<String>) -> Self {
        LedgerError::AlreadyExists { id: id.into() }
    }

    /// Create a NotFound error
    pub fn not_found(id: impl Into<String>) -> Self {
        LedgerError::NotFound { id: id.into() }
    }

    /// Create a MalformedKey error
    pub fn malformed_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        LedgerError::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        LedgerError::Serialization {
            message: message.into(),
        }
    }

    /// Create an IndexInconsistency error
    pub fn index_inconsistency(
        id: impl Into<String>,
        index_key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LedgerError::IndexInconsistency {
            id: id.into(),
            index_key: index_key.into(),
            reason: reason.into(),
        }
    }

    /// Create a QuerySyntax error
    pub fn query_syntax(message: impl Into<String>) -> Self {
        LedgerError::QuerySyntax {
            message: message.into(),
        }
    }

    /// Create a Substrate error
    pub fn substrate(message: impl Into<String>) -> Self {
        LedgerError::Substrate {
            message: message.into(),
        }
    }

    /// Create an UnknownCommand error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        LedgerError::UnknownCommand { name: name.into() }
    }

    /// Wrap a per-record failure from a bulk transfer
    pub fn transfer_aborted(
        transferred: usize,
        record_id: impl Into<String>,
        source: LedgerError,
    ) -> Self {
        LedgerError::TransferAborted {
            transferred,
            record_id: record_id.into(),
            source: Box::new(source),
        }
    }

    /// The failure kind
    ///
    /// A `TransferAborted` reports the kind of the record failure it wraps.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            LedgerError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::MalformedKey { .. } => ErrorKind::MalformedKey,
            LedgerError::Serialization { .. } => ErrorKind::Serialization,
            LedgerError::IndexInconsistency { .. } => ErrorKind::IndexInconsistency,
            LedgerError::QuerySyntax { .. } => ErrorKind::QuerySyntax,
            LedgerError::QueryUnsupported => ErrorKind::QueryUnsupported,
            LedgerError::Substrate { .. } => ErrorKind::Substrate,
            LedgerError::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            LedgerError::TransferAborted { source, .. } => source.kind(),
        }
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::serialization(e.to_string())
    }
}
