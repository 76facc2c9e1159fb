//! Options for opening a [`MemoryLedger`](crate::MemoryLedger).

use serde::{Deserialize, Serialize};

/// Capabilities of an in-memory ledger.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use worksledger_storage::LedgerOptions;
///
/// let opts = LedgerOptions::new().rich_query(false).caller("User1@org1.example.com");
/// assert!(!opts.rich_query);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerOptions {
    /// Evaluate selector queries (CouchDB-style state database).
    /// When false the ledger behaves like a key-only state database and
    /// predicate queries fail with `QueryUnsupported`.
    pub rich_query: bool,
    /// Record per-key version history.
    pub history: bool,
    /// Identity reported by `caller_identity`.
    pub caller: Option<String>,
}

impl LedgerOptions {
    /// Default options: rich query and history enabled, no caller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable selector queries.
    pub fn rich_query(mut self, enabled: bool) -> Self {
        self.rich_query = enabled;
        self
    }

    /// Enable or disable history recording.
    pub fn history(mut self, enabled: bool) -> Self {
        self.history = enabled;
        self
    }

    /// Set the caller identity.
    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            rich_query: true,
            history: true,
            caller: None,
        }
    }
}
