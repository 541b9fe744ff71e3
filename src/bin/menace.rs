//! MENACE CLI - Reinforcement learning sandbox
//!
//! This CLI provides:
//! - Training a MENACE agent against a uniform-random opponent
//! - The epsilon-greedy bandit exercises
//!
//! Log output is controlled with `RUST_LOG`, e.g. `RUST_LOG=info`.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "menace")]
#[command(version, about = "Reinforcement learning sandbox for MENACE and bandits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a MENACE agent
    Train(menace_sandbox::cli::commands::train::TrainArgs),

    /// Run a bandit experiment
    Bandit(menace_sandbox::cli::commands::bandit::BanditArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => menace_sandbox::cli::commands::train::execute(args),
        Commands::Bandit(args) => menace_sandbox::cli::commands::bandit::execute(args),
    }
}
