//! Report command implementation.
//!
//! Breaks holdings down by every section of a rules file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use allot_core::aggregate_with_config;

use crate::cli::OutputFormat;
use crate::commands::parse_currency;
use crate::loader::{ensure_currency, load_holdings};
use crate::output::{print_sections, SectionReport};
use crate::rules::load_rules;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Holdings CSV file
    #[arg(long, env = "ALLOT_HOLDINGS")]
    pub holdings: PathBuf,

    /// Rules TOML file
    #[arg(short, long, env = "ALLOT_RULES")]
    pub rules: PathBuf,

    /// Reporting currency
    #[arg(short, long, default_value = "USD", env = "ALLOT_CURRENCY")]
    pub currency: String,

    /// Only print the section with this title
    #[arg(short, long)]
    pub section: Option<String>,
}

/// Executes the report command.
pub fn execute(args: ReportArgs, format: OutputFormat) -> Result<()> {
    let currency = parse_currency(&args.currency)?;

    let holdings = load_holdings(&args.holdings)
        .with_context(|| format!("reading holdings from {}", args.holdings.display()))?;
    ensure_currency(&holdings, &currency)?;

    let rules = load_rules(&args.rules)
        .with_context(|| format!("reading rules from {}", args.rules.display()))?;

    let selected: Vec<_> = rules
        .section
        .iter()
        .filter(|s| args.section.as_deref().map_or(true, |t| s.title == t))
        .collect();
    if selected.is_empty() {
        anyhow::bail!(
            "no section titled '{}'",
            args.section.as_deref().unwrap_or_default()
        );
    }

    let mut reports = Vec::with_capacity(selected.len());
    for section in selected {
        let table = section.table()?;
        let resolver = section.resolver();
        let result = aggregate_with_config(&holdings, &table, &resolver, &rules.config)
            .with_context(|| format!("aggregating section '{}'", section.title))?;
        info!(
            "section '{}': {} labels, total {}",
            section.title,
            result.len(),
            result.total()
        );
        reports.push(SectionReport::new(&section.title, &currency, &result));
    }

    print_sections(&reports, format)
}
