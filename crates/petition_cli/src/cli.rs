use clap::{Args, Parser, Subcommand};
use petition_core::PetitionStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "petition",
    about = "Petition tracking: browse, sign and manage citizen petitions",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// SQLite database file (falls back to PETITION_DB_PATH, else an in-memory sample store)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Act as this authenticated user (anonymous when omitted)
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List petitions, newest first
    List {
        /// Exact category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Exact theme (case-insensitive)
        #[arg(long)]
        theme: Option<String>,

        /// Status: active, under_review or closed
        #[arg(long)]
        status: Option<PetitionStatus>,

        /// Target level: Federal, State or Local
        #[arg(long)]
        level: Option<String>,

        /// Substring matched against title or description
        #[arg(long)]
        search: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<u32>,

        /// Items per page (max 100)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show one petition
    Get {
        id: i64,
    },

    /// Create a petition carrying the creator's signature
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        theme: String,

        /// Target level: Federal, State or Local
        #[arg(long, default_value = "")]
        level: String,
    },

    /// Add one signature to an active petition
    Sign {
        id: i64,
    },

    /// Replace selected fields of a petition
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        level: Option<String>,

        /// New status; petitions only move forward (active -> under_review -> closed)
        #[arg(long)]
        status: Option<PetitionStatus>,
    },

    /// Delete a petition
    Delete {
        id: i64,
    },

    /// List distinct categories in use
    Categories,

    /// List distinct themes in use
    Themes,

    /// Insert the sample petitions into an empty store
    Seed,
}
