//! Currencies command implementation.
//!
//! Breaks holdings down by the currency they were bought in.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use allot_core::{
    aggregate_with_config, cost_currency_table, AllotConfig, ExactKeyResolver, HoldingField,
};

use crate::cli::OutputFormat;
use crate::commands::parse_currency;
use crate::loader::{ensure_currency, load_holdings};
use crate::output::{print_sections, SectionReport};

/// Arguments for the currencies command.
#[derive(Args, Debug)]
pub struct CurrenciesArgs {
    /// Holdings CSV file
    #[arg(long, env = "ALLOT_HOLDINGS")]
    pub holdings: PathBuf,

    /// Reporting currency
    #[arg(short, long, default_value = "USD", env = "ALLOT_CURRENCY")]
    pub currency: String,
}

/// Executes the currencies command.
pub fn execute(args: CurrenciesArgs, format: OutputFormat) -> Result<()> {
    let currency = parse_currency(&args.currency)?;

    let holdings = load_holdings(&args.holdings)
        .with_context(|| format!("reading holdings from {}", args.holdings.display()))?;
    ensure_currency(&holdings, &currency)?;

    let table = cost_currency_table(&holdings)?;
    let resolver = ExactKeyResolver::new(HoldingField::Currency);
    let result = aggregate_with_config(&holdings, &table, &resolver, &AllotConfig::default())?;
    info!(
        "{} commodities across {} cost currencies",
        table.len(),
        result.len()
    );

    let report = SectionReport::new("Cost currency", &currency, &result);
    print_sections(&[report], format)
}
