use crate::commands::{emit, CliResult, Context};
use petition_core::{authorize, Action};
use serde_json::json;

/// Seeding writes petitions, so it needs the same rights as `create`.
pub fn run(ctx: &Context) -> CliResult<()> {
    authorize(ctx.principal(), Action::Create)?;
    let inserted = ctx.service().seed_sample_petitions()?;
    emit(&json!({
        "inserted": inserted.len(),
        "petitions": inserted,
    }))
}
