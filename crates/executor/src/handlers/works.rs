//! Single-record command handlers.
//!
//! - InitWork: create a record and its index entry
//! - ReadWork: load one record
//! - DeleteWork: remove a record and its index entry
//! - TransferWork: set the schema's transfer field on one record

use serde_json::Value;
use worksledger_core::{LedgerResult, Record};

use crate::context::InvocationContext;
use crate::Output;

/// Handle InitWork command.
pub fn init_work(ctx: &InvocationContext, record: Record) -> LedgerResult<Output> {
    tracing::debug!(uid = %record.uid, "start initWork");
    ctx.records.create(&record)?;
    tracing::info!(uid = %record.uid, "work created");
    Ok(Output::Unit)
}

/// Handle ReadWork command.
pub fn read_work(ctx: &InvocationContext, uid: &str) -> LedgerResult<Output> {
    Ok(Output::Record(ctx.records.read(uid)?))
}

/// Handle DeleteWork command.
pub fn delete_work(ctx: &InvocationContext, uid: &str) -> LedgerResult<Output> {
    tracing::debug!(uid = %uid, "start delete");
    ctx.records.delete(uid)?;
    tracing::info!(uid = %uid, "work deleted");
    Ok(Output::Unit)
}

/// Handle TransferWork command.
pub fn transfer_work(ctx: &InvocationContext, uid: &str, value: &str) -> LedgerResult<Output> {
    let field = ctx.schema.transfer_field();
    tracing::debug!(uid = %uid, field, value, "start transferWork");
    ctx.records.update_field(uid, field, Value::from(value))?;
    Ok(Output::Unit)
}
