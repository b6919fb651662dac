//! # folio-cli
//!
//! Command-line interface for folio.
//!
//! Drafts changes from code-generation bots on disposable git branches:
//! - `folio generate` — run a bot against a prompt, recording a draft commit
//! - `folio finalize` — close the active folio, keeping its changes
//! - `folio discard` — abandon the active folio
//! - `folio folios/prompts/recall` — inspect recorded history

mod commands;
mod config;
mod printer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_git::Repo;
use folio_store::HistoryStore;

use crate::config::Config;

/// Draft changes from code-generation bots, kept off your branches.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Repository path (defaults to the current directory).
    #[arg(long, default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a bot against a prompt and record the result as a draft.
    Generate(commands::generate::GenerateArgs),
    /// Close the active folio, keeping its changes in the working tree.
    Finalize,
    /// Abandon the active folio and return to the origin branch.
    Discard {
        /// Also restore the paths the folio's drafts touched.
        #[arg(long)]
        revert: bool,
    },
    /// List folios recorded for this repository.
    Folios,
    /// Show the prompts of a folio.
    Prompts {
        /// Folio id (defaults to the active folio).
        #[arg(long)]
        folio: Option<i64>,
    },
    /// Print the most recent prompt of the active folio.
    Recall,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let repo = Repo::enclosing(&cli.path)?;
    let store = HistoryStore::open(&config.store_path()?)?;

    match &cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &repo, &store, &config),
        Commands::Finalize => commands::folio::finalize(&repo, &store),
        Commands::Discard { revert } => commands::folio::discard(&repo, &store, *revert),
        Commands::Folios => commands::history::folios(&repo, &store),
        Commands::Prompts { folio } => commands::history::prompts(&repo, &store, *folio),
        Commands::Recall => commands::history::recall(&repo, &store),
    }
}
