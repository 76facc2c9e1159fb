//! Scan-based command handlers: key ranges and bulk transfer by index.

use serde_json::Value;
use worksledger_core::LedgerResult;

use crate::context::InvocationContext;
use crate::Output;

/// Handle TransferByIndex command.
///
/// Ids come from an index-prefix scan, never from a predicate query.
pub fn transfer_by_index(
    ctx: &InvocationContext,
    index_value: &str,
    value: &str,
) -> LedgerResult<Output> {
    let field = ctx.schema.transfer_field();
    tracing::debug!(index_value, value, field, "start bulk transfer");
    let transferred = ctx.scanner.transfer_by_index(
        &ctx.records,
        index_value,
        field,
        &Value::from(value),
    )?;
    let message = format!(
        "Transferred {} {} works to {}",
        transferred, index_value, value
    );
    tracing::info!(transferred, index_value, "bulk transfer complete");
    Ok(Output::Text(message))
}

/// Handle GetWorksByRange command.
pub fn get_works_by_range(ctx: &InvocationContext, start: &str, end: &str) -> LedgerResult<Output> {
    let hits = ctx
        .scanner
        .scan_range(start, end)?
        .collect::<LedgerResult<Vec<_>>>()?;
    tracing::debug!(start, end, hits = hits.len(), "range scan");
    Ok(Output::Records(hits))
}
