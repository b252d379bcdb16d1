//! # maskchat
//!
//! Command-line front end for the maskchat store: manage masks and
//! dialogues, append and edit messages, and print reports.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use maskchat_store::{ChatStore, StoreConfig};

#[derive(Debug, Parser)]
#[command(name = "maskchat")]
#[command(about = "maskchat - local store for masks, dialogues and messages", long_about = None)]
struct Cli {
    /// Database file (overrides MASKCHAT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a new mask
    AddMask(commands::masks::AddMaskArgs),
    /// Delete a mask by name
    DeleteMask(commands::masks::DeleteMaskArgs),
    /// Create a dialogue if it does not exist yet
    CreateDialogue(commands::dialogues::CreateDialogueArgs),
    /// Append a message to a dialogue
    Send(commands::messages::SendArgs),
    /// Replace the content of a message
    Edit(commands::messages::EditArgs),
    /// Delete a message
    Remove(commands::messages::RemoveArgs),
    /// Print every message of a dialogue, oldest first
    History(commands::messages::HistoryArgs),
    /// Print a report: `dialogues`, `masks` or `messages <dialogue> <count>`
    Render(commands::render::RenderArgs),
    /// Populate a sample dialogue and print all three reports
    Demo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,maskchat_store=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(path) = cli.db {
        config.db_path = Some(path);
    }
    tracing::debug!(?config, "loaded configuration");

    let store = ChatStore::open(&config)?;

    let output = match cli.command {
        Commands::AddMask(args) => commands::masks::add(&store, args),
        Commands::DeleteMask(args) => commands::masks::delete(&store, args),
        Commands::CreateDialogue(args) => commands::dialogues::create(&store, args),
        Commands::Send(args) => commands::messages::send(&store, args),
        Commands::Edit(args) => commands::messages::edit(&store, args),
        Commands::Remove(args) => commands::messages::remove(&store, args),
        Commands::History(args) => commands::messages::history(&store, args),
        Commands::Render(args) => commands::render::execute(&store, args),
        Commands::Demo => commands::render::demo(&store),
    }?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
