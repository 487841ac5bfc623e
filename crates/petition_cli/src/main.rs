//! Petition CLI: the `petition` command.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{petitions, seed, taxonomy, CliResult, Context};
use petition_core::{CreatePetitionRequest, PetitionFilter, PetitionUpdate, TargetLevel};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let ctx = Context::open(&cli.global)?;

    match cli.command {
        Commands::List {
            category,
            theme,
            status,
            level,
            search,
            page,
            page_size,
        } => petitions::list(
            &ctx,
            PetitionFilter {
                category,
                theme,
                status,
                target_level: level,
                search_text: search,
                page,
                page_size,
            },
        ),

        Commands::Get { id } => petitions::get(&ctx, id),

        Commands::Create {
            title,
            description,
            category,
            theme,
            level,
        } => petitions::create(
            &ctx,
            CreatePetitionRequest {
                title,
                description,
                category,
                theme,
                created_by: String::new(),
                target_level: canonical_level(&level),
            },
        ),

        Commands::Sign { id } => petitions::sign(&ctx, id),

        Commands::Update {
            id,
            title,
            description,
            category,
            theme,
            level,
            status,
        } => petitions::update(
            &ctx,
            id,
            PetitionUpdate {
                title,
                description,
                category,
                theme,
                target_level: level.as_deref().map(canonical_level),
                status,
            },
        ),

        Commands::Delete { id } => petitions::delete(&ctx, id),

        Commands::Categories => taxonomy::categories(&ctx),

        Commands::Themes => taxonomy::themes(&ctx),

        Commands::Seed => seed::run(&ctx),
    }
}

/// Spells well-known target levels canonically; other text passes through.
fn canonical_level(level: &str) -> String {
    match TargetLevel::parse(level) {
        Some(known) => known.as_str().to_string(),
        None => level.to_string(),
    }
}
