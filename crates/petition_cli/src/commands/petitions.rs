use crate::commands::{emit, CliResult, Context};
use petition_core::{CreatePetitionRequest, PetitionFilter, PetitionId, PetitionUpdate};
use serde_json::json;

pub fn list(ctx: &Context, filter: PetitionFilter) -> CliResult<()> {
    let page = ctx.petitions().query_petitions(&filter)?;
    emit(&page)
}

pub fn get(ctx: &Context, id: PetitionId) -> CliResult<()> {
    emit(&ctx.petitions().get_petition(id)?)
}

pub fn create(ctx: &Context, request: CreatePetitionRequest) -> CliResult<()> {
    emit(&ctx.petitions().create_petition(request)?)
}

pub fn sign(ctx: &Context, id: PetitionId) -> CliResult<()> {
    emit(&ctx.petitions().sign_petition(id)?)
}

pub fn update(ctx: &Context, id: PetitionId, update: PetitionUpdate) -> CliResult<()> {
    emit(&ctx.petitions().update_petition(id, &update)?)
}

pub fn delete(ctx: &Context, id: PetitionId) -> CliResult<()> {
    ctx.petitions().delete_petition(id)?;
    emit(&json!({ "deleted": id }))
}
