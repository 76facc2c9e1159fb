//! Typed commands and their argument parsers.
//!
//! The dispatcher receives a name and positional string arguments. The
//! [`CommandRegistry`](crate::CommandRegistry) resolves the name to one of
//! the parsers below, which validates the arguments and yields a
//! [`Command`].

use worksledger_core::{LedgerResult, Record};
use worksledger_primitives::WorkLogEntry;

use crate::args;
use crate::schema::SchemaProfile;

/// A validated command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a work record
    InitWork {
        /// Record to store
        record: Record,
    },
    /// Read one work record
    ReadWork {
        /// Record id
        uid: String,
    },
    /// Delete one work record and its index entry
    DeleteWork {
        /// Record id
        uid: String,
    },
    /// Set the transfer field of one record
    TransferWork {
        /// Record id
        uid: String,
        /// New value, lower-cased
        value: String,
    },
    /// Set the transfer field of every record under one index value
    TransferByIndex {
        /// Leading index segment to match
        index_value: String,
        /// New value, lower-cased
        value: String,
    },
    /// Records with primary keys in `[start, end)`
    GetWorksByRange {
        /// Inclusive start key
        start: String,
        /// Exclusive end key, empty for unbounded
        end: String,
    },
    /// Ad hoc predicate query
    QueryWorks {
        /// Query document, passed verbatim
        query: String,
    },
    /// Parameterized query on the schema's query field
    QueryWorksByField {
        /// Value to match, lower-cased when the query is built
        value: String,
    },
    /// Version history of one record
    GetHistoryForWork {
        /// Record id
        uid: String,
    },
    /// Append a caller-attributed work log entry
    RecordWork {
        /// Entry id within the caller's log
        entry_id: String,
        /// Entry body
        entry: WorkLogEntry,
    },
    /// List work log entries
    ListWork {
        /// Member to list; the caller's own member when absent
        member: Option<String>,
    },
}

impl Command {
    /// Canonical command name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::InitWork { .. } => "initWork",
            Command::ReadWork { .. } => "readWork",
            Command::DeleteWork { .. } => "delete",
            Command::TransferWork { .. } => "transferWork",
            Command::TransferByIndex { .. } => "transferWorksBasedOnIndex",
            Command::GetWorksByRange { .. } => "getWorksByRange",
            Command::QueryWorks { .. } => "queryWorks",
            Command::QueryWorksByField { .. } => "queryWorksByField",
            Command::GetHistoryForWork { .. } => "getHistoryForWork",
            Command::RecordWork { .. } => "work",
            Command::ListWork { .. } => "listWork",
        }
    }

    /// Whether the command may write to the substrate
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::InitWork { .. }
                | Command::DeleteWork { .. }
                | Command::TransferWork { .. }
                | Command::TransferByIndex { .. }
                | Command::RecordWork { .. }
        )
    }
}

// =============================================================================
// Parsers
// =============================================================================

/// Signature shared by every argument parser
pub type ParseFn = fn(&[String], SchemaProfile) -> LedgerResult<Command>;

pub(crate) fn parse_init_work(argv: &[String], schema: SchemaProfile) -> LedgerResult<Command> {
    Ok(Command::InitWork {
        record: schema.build_record(argv)?,
    })
}

pub(crate) fn parse_read_work(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_exact(argv, 1)?;
    Ok(Command::ReadWork {
        uid: argv[0].clone(),
    })
}

pub(crate) fn parse_delete(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_exact(argv, 1)?;
    Ok(Command::DeleteWork {
        uid: argv[0].clone(),
    })
}

pub(crate) fn parse_transfer_work(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 2)?;
    Ok(Command::TransferWork {
        uid: argv[0].clone(),
        value: argv[1].to_lowercase(),
    })
}

pub(crate) fn parse_transfer_by_index(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 2)?;
    Ok(Command::TransferByIndex {
        index_value: argv[0].clone(),
        value: argv[1].to_lowercase(),
    })
}

pub(crate) fn parse_get_works_by_range(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 2)?;
    Ok(Command::GetWorksByRange {
        start: argv[0].clone(),
        end: argv[1].clone(),
    })
}

pub(crate) fn parse_query_works(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 1)?;
    Ok(Command::QueryWorks {
        query: argv[0].clone(),
    })
}

pub(crate) fn parse_query_by_field(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 1)?;
    Ok(Command::QueryWorksByField {
        value: argv[0].clone(),
    })
}

pub(crate) fn parse_get_history(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_least(argv, 1)?;
    Ok(Command::GetHistoryForWork {
        uid: argv[0].clone(),
    })
}

pub(crate) fn parse_record_work(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_exact(argv, 6)?;
    args::exact_len(&argv[0], 0, "uid", 32)?;
    args::exact_len(&argv[2], 2, "applyDate", 14)?;
    args::exact_len(&argv[3], 3, "workStartDate", 14)?;
    args::exact_len(&argv[4], 4, "workEndDate", 14)?;
    args::non_empty(&argv[5], 5)?;
    Ok(Command::RecordWork {
        entry_id: argv[5].clone(),
        entry: WorkLogEntry::new(
            argv[0].as_str(),
            argv[1].as_str(),
            argv[2].as_str(),
            argv[3].as_str(),
            argv[4].as_str(),
        ),
    })
}

pub(crate) fn parse_list_work(argv: &[String], _: SchemaProfile) -> LedgerResult<Command> {
    args::expect_at_most(argv, 1)?;
    Ok(Command::ListWork {
        member: argv.first().filter(|m| !m.is_empty()).cloned(),
    })
}
