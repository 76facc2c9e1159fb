//! Command name registry.
//!
//! Maps every accepted command name, aliases included, to its argument
//! parser. Built once per executor and checked for duplicate names.

use rustc_hash::FxHashMap;
use worksledger_core::{LedgerError, LedgerResult};

use crate::command::{self, Command, ParseFn};
use crate::schema::SchemaProfile;

const BASE_COMMANDS: &[(&str, ParseFn)] = &[
    ("initWork", command::parse_init_work),
    ("initwork", command::parse_init_work),
    ("readWork", command::parse_read_work),
    ("readwork", command::parse_read_work),
    ("delete", command::parse_delete),
    ("transferWork", command::parse_transfer_work),
    ("transferwork", command::parse_transfer_work),
    ("transferWorksBasedOnIndex", command::parse_transfer_by_index),
    ("getWorksByRange", command::parse_get_works_by_range),
    ("getworksByRange", command::parse_get_works_by_range),
    ("queryWorks", command::parse_query_works),
    ("queryworks", command::parse_query_works),
    ("getHistoryForWork", command::parse_get_history),
    ("getHistoryForwork", command::parse_get_history),
    ("work", command::parse_record_work),
    ("listWork", command::parse_list_work),
];

/// Name-to-parser table for one schema
#[derive(Clone)]
pub struct CommandRegistry {
    schema: SchemaProfile,
    parsers: FxHashMap<&'static str, ParseFn>,
}

impl CommandRegistry {
    /// Registry with the base commands and the schema's aliases
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if two entries share a name.
    pub fn for_schema(schema: SchemaProfile) -> LedgerResult<Self> {
        let mut entries: Vec<(&'static str, ParseFn)> = BASE_COMMANDS.to_vec();
        for alias in schema.transfer_aliases() {
            entries.push((*alias, command::parse_transfer_by_index));
        }
        for alias in schema.query_aliases() {
            entries.push((*alias, command::parse_query_by_field));
        }
        Self::from_entries(schema, entries)
    }

    fn from_entries(
        schema: SchemaProfile,
        entries: Vec<(&'static str, ParseFn)>,
    ) -> LedgerResult<Self> {
        let mut parsers = FxHashMap::default();
        for (name, parse) in entries {
            if parsers.insert(name, parse).is_some() {
                return Err(LedgerError::invalid_argument(format!(
                    "command {} registered twice",
                    name
                )));
            }
        }
        Ok(Self { schema, parsers })
    }

    /// Resolve `name` and validate `args`
    ///
    /// # Errors
    ///
    /// - `UnknownCommand` if no parser is registered under `name`
    /// - `InvalidArgument` if the arguments do not fit the command
    pub fn parse(&self, name: &str, args: &[String]) -> LedgerResult<Command> {
        let parse = self
            .parsers
            .get(name)
            .ok_or_else(|| LedgerError::unknown_command(name))?;
        parse(args, self.schema)
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.parsers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("schema", &self.schema)
            .field("commands", &self.parsers.len())
            .finish()
    }
}
