//! ifacegen CLI - artifact generator for C interface files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for `-` destinations
    let filter = if cli.verbose {
        EnvFilter::new("ifacegen=debug")
    } else {
        EnvFilter::new("ifacegen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Symbols(args) => commands::symbols::execute(args, config),
        Commands::Header(args) => commands::header::execute(args, config),
        Commands::Ffi(args) => commands::ffi::execute(args, config),
    }
}
