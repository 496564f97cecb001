//! HEXSTRAT CLI - Command-line interface
//!
//! Commands:
//! - play: Run a session from an intent script or stdin
//! - board: Generate and print a board

mod board_cmd;
mod play_cmd;
mod render;
mod script;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexstrat")]
#[command(about = "Two-player hex tactics in the terminal")]
struct Cli {
    /// Seed for terrain generation (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play(play_cmd::PlayArgs),
    /// Print a generated board
    Board(board_cmd::BoardArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides, warnings by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Board(args) => board_cmd::run(args, cli.seed),
    }
}
