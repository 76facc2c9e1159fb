//! Caller-attributed work log handlers.

use worksledger_core::LedgerResult;
use worksledger_primitives::{member_name, WorkLogEntry};

use crate::context::InvocationContext;
use crate::Output;

/// Confirmation returned by RecordWork.
pub const WORK_RECORDED: &str = "work experience recorded";

/// Handle RecordWork command.
pub fn record_work(
    ctx: &InvocationContext,
    entry_id: &str,
    entry: &WorkLogEntry,
) -> LedgerResult<Output> {
    let member = ctx.caller_member()?;
    ctx.worklog.record(&member, entry_id, entry)?;
    tracing::info!(member = %member, entry_id, "work log entry recorded");
    Ok(Output::Text(WORK_RECORDED.to_string()))
}

/// Handle ListWork command.
///
/// An explicit member is normalized the same way as a caller identity.
pub fn list_work(ctx: &InvocationContext, member: Option<&str>) -> LedgerResult<Output> {
    let member = match member {
        Some(m) => member_name(m)?,
        None => ctx.caller_member()?,
    };
    let hits = ctx
        .worklog
        .list(&member)?
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok(Output::Records(hits))
}
