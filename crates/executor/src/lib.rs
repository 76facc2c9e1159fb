//! Command dispatch layer for worksledger
//!
//! Turns named invocations with positional string arguments into calls on
//! the primitives:
//! - `CommandRegistry`: command names and aliases to argument parsers
//! - `Command`: validated, typed command
//! - `Executor`: dispatch to handlers, conversion to payload or `Rejection`
//!
//! The active `SchemaProfile` decides the record shape, the secondary index,
//! and which field bulk transfer and field queries touch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod command;
pub mod config;
pub mod context;
pub mod convert;
pub mod executor;
pub mod handlers;
pub mod output;
pub mod registry;
pub mod schema;

pub use command::{Command, ParseFn};
pub use config::{ConfigError, ExecutorConfig};
pub use context::InvocationContext;
pub use convert::{convert_result, Rejection};
pub use executor::Executor;
pub use output::Output;
pub use registry::CommandRegistry;
pub use schema::SchemaProfile;
