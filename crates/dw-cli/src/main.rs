//! CLI frontend for the Dicewright encounter engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dw",
    about = "Dicewright — deterministic dice, encounter generation, and table checks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression such as 2d6+1 or d20
    Roll(commands::roll::RollArgs),

    /// Generate an encounter spec for a party
    Generate(commands::generate::GenerateArgs),

    /// Validate an encounter spec against a monster catalog
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&args),
        Commands::Generate(args) => commands::generate::run(&args),
        Commands::Validate(args) => commands::validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
