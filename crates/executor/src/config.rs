//! Executor configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! schema = "marbles"        # or "resume"
//! index_policy = "preserve" # or "rekey"
//! caller = "User1@org1.example.com"
//! log_level = "info"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use worksledger_primitives::IndexPolicy;

use crate::schema::SchemaProfile;

/// Configuration load failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid configuration TOML
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Executor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Record schema
    pub schema: SchemaProfile,
    /// Index behaviour on indexed-field updates
    pub index_policy: IndexPolicy,
    /// Caller identity used when the substrate does not supply one
    pub caller: Option<String>,
    /// Default log filter for the binary
    pub log_level: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            schema: SchemaProfile::default(),
            index_policy: IndexPolicy::default(),
            caller: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema
    pub fn schema(mut self, schema: SchemaProfile) -> Self {
        self.schema = schema;
        self
    }

    /// Set the index policy
    pub fn index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Set the fallback caller identity
    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Set the default log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
