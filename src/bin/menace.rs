//! MENACE CLI - Matchbox learning bot for noughts and crosses
//!
//! This CLI provides a unified interface for:
//! - Inspecting the canonical state space
//! - Training the bot against a random or learning opponent
//! - Playing against the bot on the terminal
//! - Rebuilding the bot from recorded game logs

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "menace")]
#[command(version, about = "Matchbox learning bot for noughts and crosses", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical state space by rank
    States(menace_bot::cli::commands::states::StatesArgs),

    /// Train the bot
    Train(Box<menace_bot::cli::commands::train::TrainArgs>),

    /// Play against the bot
    Play(menace_bot::cli::commands::play::PlayArgs),

    /// Rebuild the bot from game logs and inspect it
    Replay(menace_bot::cli::commands::replay::ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::States(args) => menace_bot::cli::commands::states::execute(args),
        Commands::Train(args) => menace_bot::cli::commands::train::execute(*args),
        Commands::Play(args) => menace_bot::cli::commands::play::execute(args),
        Commands::Replay(args) => menace_bot::cli::commands::replay::execute(args),
    }
}
