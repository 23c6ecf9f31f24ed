//! Allot CLI - Command-line interface for weighted holdings classification.
//!
//! # Usage
//!
//! ```bash
//! # Break holdings down by the sections of a rules file
//! allot report --holdings holdings.csv --rules rules.toml --currency USD
//!
//! # Break holdings down by the currency they were bought in
//! allot currencies --holdings holdings.csv --currency USD
//!
//! # Same, as JSON
//! allot --format json currencies --holdings holdings.csv --currency USD
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod loader;
mod output;
mod rules;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the report itself
    let default_filter = if cli.verbose {
        "allot=debug,allot_core=debug"
    } else {
        "allot=warn,allot_core=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Set up output format
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Report(args) => commands::report::execute(args, format)?,
        Commands::Currencies(args) => commands::currencies::execute(args, format)?,
    }

    Ok(())
}
