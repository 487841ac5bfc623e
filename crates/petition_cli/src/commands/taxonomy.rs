use crate::commands::{emit, CliResult, Context};

pub fn categories(ctx: &Context) -> CliResult<()> {
    emit(&ctx.petitions().list_categories()?)
}

pub fn themes(ctx: &Context) -> CliResult<()> {
    emit(&ctx.petitions().list_themes()?)
}
