//! Sana Control - CLI front-end for the Sana triage engine.
//!
//! Runs the conversational interview in a terminal. Rendering and pacing
//! live here; all triage logic is in sana-core.

mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sanactl")]
#[command(about = "Sana - conversational symptom triage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available symptoms
    List,

    /// Run a triage interview for one or more symptom ids
    Check {
        /// Symptom ids, in the order you want them checked (e.g. FEV-202)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,

        /// Skip the settling delay between symptom modules
        #[arg(long)]
        no_delay: bool,
    },

    /// Validate the builtin catalog and show per-symptom counts
    CatalogLint,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List => commands::list(),
        Commands::Check { ids, json, no_delay } => commands::check(ids, json, no_delay),
        Commands::CatalogLint => commands::catalog_lint(),
    }
}
