//! `baggage`: inspect and rewrite serialized baggage from the command line.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::BaggageConfig;

#[derive(Parser)]
#[command(name = "baggage", version, about = "Inspect and rewrite baggage contexts")]
struct Cli {
    /// Configuration file (default: ./baggage.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bag tree of a base64-encoded baggage
    Inspect {
        /// Base64-encoded baggage
        baggage: String,
        /// Print a JSON document instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Merge baggages and print the result as base64
    Merge {
        /// Base64-encoded baggages
        #[arg(required = true)]
        baggages: Vec<String>,
    },
    /// Trim a baggage to a serialized size budget
    Trim {
        /// Base64-encoded baggage
        baggage: String,
        /// Byte budget (default: [trim] max_bytes from the config)
        #[arg(long)]
        max_bytes: Option<usize>,
    },
    /// Remove a top-level bag
    Drop {
        /// Base64-encoded baggage
        baggage: String,
        /// Index of the bag to remove
        #[arg(long)]
        bag: u64,
    },
    /// Build a baggage holding one bag of data atoms
    Encode {
        /// Index of the bag to write
        #[arg(long)]
        bag: u64,
        /// Hex-encoded data payloads
        payloads: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = BaggageConfig::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Inspect { baggage, json } => commands::inspect::run(&config, &baggage, json),
        Commands::Merge { baggages } => commands::merge::run(&baggages),
        Commands::Trim { baggage, max_bytes } => {
            commands::trim::run(&baggage, max_bytes.unwrap_or(config.trim.max_bytes))
        }
        Commands::Drop { baggage, bag } => commands::drop::run(&baggage, bag),
        Commands::Encode { bag, payloads } => commands::encode::run(bag, &payloads),
    }
}
