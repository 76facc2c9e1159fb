//! Record schemas
//!
//! A schema fixes the shape of `initWork` arguments, which field is indexed,
//! which field the transfer commands rewrite, and the names of the
//! schema-specific command aliases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use worksledger_core::{LedgerError, LedgerResult, Record};
use worksledger_primitives::IndexSpec;

use crate::args;

/// Supported record schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaProfile {
    /// `uid workstartdate workenddate workexperience`, indexed by `workstartdate`
    #[default]
    Marbles,
    /// `uid workexperience applyDate workStartDate workEndDate key`, indexed by
    /// `workexperience`
    Resume,
}

impl SchemaProfile {
    /// Name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaProfile::Marbles => "marbles",
            SchemaProfile::Resume => "resume",
        }
    }

    /// Secondary index layout
    pub fn index_spec(&self) -> IndexSpec {
        match self {
            SchemaProfile::Marbles => IndexSpec::new("workstartdate~uid", "workstartdate"),
            SchemaProfile::Resume => IndexSpec::new("workexperience~uid", "workexperience"),
        }
    }

    /// Field rewritten by `transferWork` and the bulk transfer
    pub fn transfer_field(&self) -> &'static str {
        match self {
            SchemaProfile::Marbles => "workexperience",
            SchemaProfile::Resume => "workStartDate",
        }
    }

    /// Field matched by the parameterized query command
    pub fn query_field(&self) -> &'static str {
        match self {
            SchemaProfile::Marbles => "workexperience",
            SchemaProfile::Resume => "workStartDate",
        }
    }

    /// Schema-specific names of the bulk transfer command
    pub fn transfer_aliases(&self) -> &'static [&'static str] {
        match self {
            SchemaProfile::Marbles => &["transferWorksBasedOnWorkstartdate"],
            SchemaProfile::Resume => &["transferworksBasedOnworkexperience"],
        }
    }

    /// Names of the parameterized query command
    pub fn query_aliases(&self) -> &'static [&'static str] {
        match self {
            SchemaProfile::Marbles => &["queryWorksByWorkexperience", "queryworksByworkexperience"],
            SchemaProfile::Resume => &["queryWorksByWorkstartdate", "queryworksByworkstartdate"],
        }
    }

    /// Validate `initWork` arguments and build the record
    pub fn build_record(&self, argv: &[String]) -> LedgerResult<Record> {
        match self {
            SchemaProfile::Marbles => {
                args::expect_exact(argv, 4)?;
                for (i, arg) in argv.iter().enumerate() {
                    args::non_empty(arg, i)?;
                }
                let workenddate = args::integer(&argv[2], 2)?;
                Ok(Record::new(argv[0].as_str())
                    .with_field("workstartdate", argv[1].to_lowercase())
                    .with_field("workenddate", workenddate)
                    .with_field("workexperience", argv[3].to_lowercase()))
            }
            SchemaProfile::Resume => {
                args::expect_exact(argv, 6)?;
                args::exact_len(&argv[0], 0, "uid", 32)?;
                args::non_empty(&argv[1], 1)?;
                args::exact_len(&argv[2], 2, "applyDate", 14)?;
                args::exact_len(&argv[3], 3, "workStartDate", 14)?;
                args::exact_len(&argv[4], 4, "workEndDate", 14)?;
                let key = args::integer(&argv[5], 5)?;
                Ok(Record::new(argv[0].as_str())
                    .with_field("workexperience", argv[1].as_str())
                    .with_field("applyDate", argv[2].as_str())
                    .with_field("workStartDate", argv[3].as_str())
                    .with_field("workEndDate", argv[4].as_str())
                    .with_field("key", key))
            }
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaProfile {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "marbles" => Ok(SchemaProfile::Marbles),
            "resume" => Ok(SchemaProfile::Resume),
            other => Err(LedgerError::invalid_argument(format!(
                "unknown schema {:?}, expected marbles or resume",
                other
            ))),
        }
    }
}
