//! Formica CLI - Command-line interface for colony agent decision cores.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formica")]
#[command(author, version, about = "Formica - Decision core for colony agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a mark into its 32-bit wire word
    Encode {
        /// Signal kind (bug, enemy, pile, carriers, protection, attack, or 0-15)
        kind: String,

        /// Home-relative x coordinate
        #[arg(allow_hyphen_values = true)]
        x: i32,

        /// Home-relative y coordinate
        #[arg(allow_hyphen_values = true)]
        y: i32,

        /// Hop count (0-3)
        #[arg(long, default_value = "0")]
        hops: u8,
    },

    /// Decode a 32-bit wire word
    Decode {
        /// The word, decimal or 0x-prefixed hex
        word: String,
    },

    /// Print or write the default formica.toml
    Config {
        /// Write to this path instead of printing
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Feed a scripted host session through one agent
    Replay {
        /// JSON script file
        script: String,

        /// Role override (forager, fighter, scout, coordinator)
        #[arg(short, long)]
        role: Option<String>,

        /// Print decisions as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode { kind, x, y, hops } => commands::encode::run(&kind, x, y, hops),
        Commands::Decode { word } => commands::decode::run(&word),
        Commands::Config { output } => commands::config::run(output),
        Commands::Replay { script, role, json } => {
            commands::replay::run(&script, role.as_deref(), json)
        }
    }
}
