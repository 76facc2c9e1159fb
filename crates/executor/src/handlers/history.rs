//! History command handler.

use worksledger_core::LedgerResult;

use crate::context::InvocationContext;
use crate::Output;

/// Handle GetHistoryForWork command.
///
/// An id that was never written returns an empty history, not `NotFound`.
pub fn get_history_for_work(ctx: &InvocationContext, uid: &str) -> LedgerResult<Output> {
    let entries = ctx
        .history
        .history(uid)?
        .collect::<LedgerResult<Vec<_>>>()?;
    tracing::debug!(uid = %uid, versions = entries.len(), "history read");
    Ok(Output::History(entries))
}
