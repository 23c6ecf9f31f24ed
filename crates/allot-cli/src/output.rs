//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use allot_core::{AggregationResult, ReportRow};

use crate::cli::OutputFormat;

/// One titled breakdown ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    /// Section heading.
    pub title: String,
    /// Reporting currency.
    pub currency: String,
    /// Sum of all row values.
    pub total: Decimal,
    /// Rows sorted by value, largest first.
    pub rows: Vec<ReportRow>,
}

impl SectionReport {
    /// Builds a report from an aggregation result.
    pub fn new(
        title: impl Into<String>,
        currency: impl Into<String>,
        result: &AggregationResult,
    ) -> Self {
        Self {
            title: title.into(),
            currency: currency.into(),
            total: result.total(),
            rows: result.breakdown(),
        }
    }
}

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    section: &'a str,
    label: &'a str,
    value: String,
    currency: &'a str,
    fraction: String,
}

/// Prints every section in the requested format.
pub fn print_sections(sections: &[SectionReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_tables(sections),
        OutputFormat::Json => print_json(sections),
        OutputFormat::Csv => print_csv(sections),
    }
}

fn print_tables(sections: &[SectionReport]) -> anyhow::Result<()> {
    for section in sections {
        // Nothing to split a share of
        if section.total.is_zero() {
            continue;
        }
        print_header(&section.title);

        let rows: Vec<DisplayRow> = section
            .rows
            .iter()
            .map(|r| DisplayRow {
                label: r.label.clone(),
                value: format_amount(r.value),
                currency: section.currency.clone(),
                share: format_percent(r.fraction),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::first()).with(Alignment::left()))
            .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
            .with(Modify::new(Columns::last()).with(Alignment::right()))
            .to_string();
        println!("{table}");
        println!(
            "{} {} {}",
            "Total:".dimmed(),
            format_amount(section.total),
            section.currency
        );
    }
    Ok(())
}

fn print_json(sections: &[SectionReport]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(sections)?);
    Ok(())
}

fn print_csv(sections: &[SectionReport]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for section in sections {
        for row in &section.rows {
            wtr.serialize(CsvRow {
                section: &section.title,
                label: &row.label,
                value: row.value.to_string(),
                currency: &section.currency,
                fraction: row.fraction.to_string(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a monetary amount with two decimals.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Formats a 0-1 fraction as a percentage with one decimal.
pub fn format_percent(fraction: Decimal) -> String {
    format!("{:.1}%", (fraction * Decimal::ONE_HUNDRED).round_dp(1))
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_core::{ClassificationTable, FeatureVector, Holding, PrefixKeyResolver};
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_amount(dec!(1234.5)), "1234.50");
        assert_eq!(format_percent(dec!(0.4419)), "44.2%");
        assert_eq!(format_percent(Decimal::ZERO), "0.0%");
    }

    #[test]
    fn test_section_report() {
        let table = ClassificationTable::new()
            .with_entry("Assets:A", FeatureVector::single("Equity"))
            .unwrap()
            .with_entry("Assets:B", FeatureVector::single("Bond"))
            .unwrap();
        let holdings = vec![
            Holding::builder().account("Assets:A:1").market_value(dec!(75)).build().unwrap(),
            Holding::builder().account("Assets:B:1").market_value(dec!(25)).build().unwrap(),
        ];
        let result = allot_core::aggregate(&holdings, &table, &PrefixKeyResolver).unwrap();

        let report = SectionReport::new("Asset class", "USD", &result);
        assert_eq!(report.total, dec!(100));
        assert_eq!(report.rows[0].label, "Equity");
        assert_eq!(report.rows[0].fraction, dec!(0.75));
    }
}
