//! Predicate query handlers. Results are for reporting only.

use worksledger_core::LedgerResult;

use crate::context::InvocationContext;
use crate::Output;

/// Handle QueryWorks command.
pub fn query_works(ctx: &InvocationContext, query: &str) -> LedgerResult<Output> {
    let hits = ctx.queries.query(query)?.collect::<LedgerResult<Vec<_>>>()?;
    Ok(Output::Records(hits))
}

/// Handle QueryWorksByField command.
pub fn query_works_by_field(ctx: &InvocationContext, value: &str) -> LedgerResult<Output> {
    let hits = ctx
        .queries
        .query_by_field(ctx.schema.query_field(), value)?
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok(Output::Records(hits))
}
