//! The command executor.
//!
//! `Executor` is the single entry point for invocations: a command name plus
//! positional string arguments in, a payload or a [`Rejection`] out.
//!
//! ```
//! use worksledger_executor::{Executor, ExecutorConfig};
//!
//! let executor = Executor::in_memory(ExecutorConfig::default()).unwrap();
//! executor.invoke("initWork", &["w1", "blue", "35", "tom"]).unwrap();
//! let payload = executor.invoke("readWork", &["w1"]).unwrap();
//! assert!(String::from_utf8(payload).unwrap().contains("\"workstartdate\":\"blue\""));
//! ```

use std::sync::Arc;

use worksledger_core::{LedgerResult, Substrate};
use worksledger_storage::{LedgerOptions, MemoryLedger};

use crate::command::Command;
use crate::config::ExecutorConfig;
use crate::context::InvocationContext;
use crate::convert::Rejection;
use crate::handlers;
use crate::output::Output;
use crate::registry::CommandRegistry;

/// Command executor over one substrate
///
/// Stateless apart from the substrate it wraps; `Send + Sync`, and every
/// call is independent.
#[derive(Debug, Clone)]
pub struct Executor {
    ctx: InvocationContext,
    registry: CommandRegistry,
    config: ExecutorConfig,
}

impl Executor {
    /// Build an executor, validating the command registry
    pub fn new(substrate: Arc<dyn Substrate>, config: ExecutorConfig) -> LedgerResult<Self> {
        let registry = CommandRegistry::for_schema(config.schema)?;
        let ctx = InvocationContext::new(substrate, &config);
        tracing::debug!(
            schema = %config.schema,
            index_policy = ?config.index_policy,
            commands = registry.names().len(),
            "executor ready"
        );
        Ok(Self {
            ctx,
            registry,
            config,
        })
    }

    /// Executor over a fresh [`MemoryLedger`]
    pub fn in_memory(config: ExecutorConfig) -> LedgerResult<Self> {
        Self::new(Arc::new(MemoryLedger::with_options(LedgerOptions::default())), config)
    }

    /// Configuration in effect
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Handler context
    pub fn context(&self) -> &InvocationContext {
        &self.ctx
    }

    /// Command registry
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Resolve and validate a named invocation
    pub fn parse(&self, name: &str, args: &[String]) -> LedgerResult<Command> {
        self.registry.parse(name, args)
    }

    /// Execute a validated command
    pub fn execute(&self, command: Command) -> LedgerResult<Output> {
        let ctx = &self.ctx;
        match command {
            Command::InitWork { record } => handlers::works::init_work(ctx, record),
            Command::ReadWork { uid } => handlers::works::read_work(ctx, &uid),
            Command::DeleteWork { uid } => handlers::works::delete_work(ctx, &uid),
            Command::TransferWork { uid, value } => {
                handlers::works::transfer_work(ctx, &uid, &value)
            }
            Command::TransferByIndex { index_value, value } => {
                handlers::scan::transfer_by_index(ctx, &index_value, &value)
            }
            Command::GetWorksByRange { start, end } => {
                handlers::scan::get_works_by_range(ctx, &start, &end)
            }
            Command::QueryWorks { query } => handlers::query::query_works(ctx, &query),
            Command::QueryWorksByField { value } => {
                handlers::query::query_works_by_field(ctx, &value)
            }
            Command::GetHistoryForWork { uid } => {
                handlers::history::get_history_for_work(ctx, &uid)
            }
            Command::RecordWork { entry_id, entry } => {
                handlers::worklog::record_work(ctx, &entry_id, &entry)
            }
            Command::ListWork { member } => handlers::worklog::list_work(ctx, member.as_deref()),
        }
    }

    /// Parse and execute a named invocation, returning the typed output
    pub fn invoke_output<S: AsRef<str>>(
        &self,
        name: &str,
        args: &[S],
    ) -> Result<Output, Rejection> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let result = self.parse(name, &args).and_then(|command| {
            tracing::debug!(
                command = command.name(),
                write = command.is_write(),
                "executing"
            );
            self.execute(command)
        });
        match result {
            Ok(output) => Ok(output),
            Err(e) => {
                tracing::warn!(command = name, kind = %e.kind(), error = %e, "invocation rejected");
                Err(Rejection::from(e))
            }
        }
    }

    /// Parse and execute a named invocation, returning the payload bytes
    pub fn invoke<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<Vec<u8>, Rejection> {
        let output = self.invoke_output(name, args)?;
        output.to_payload().map_err(Rejection::from)
    }
}
