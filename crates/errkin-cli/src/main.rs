//! errkin CLI
//!
//! Command-line interface for inspecting error kind catalogs

use clap::{Parser, Subcommand};
use errkin_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "errkin")]
#[command(about = "errkin - Structured, hierarchical error kinds", long_about = None)]
struct Cli {
    /// Log output format on stderr (pretty, json)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the kinds declared in a catalog
    Kinds(commands::kinds::KindsArgs),
    /// Build an instance of a catalog kind and print it
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let result = match cli.command {
        Commands::Kinds(args) => commands::kinds::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
