//! Holdings CSV loading.
//!
//! Reads the holdings export produced by a ledger tool, one position per
//! row. Recognized columns: `account`, `number`, `currency`, `cost_currency`,
//! `book_value`, `market_value`, `price_currency`. Other columns are
//! ignored; empty cells are treated as absent.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use allot_core::Holding;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// Raw CSV row; numbers are kept as text so they parse exactly.
#[derive(Debug, Deserialize)]
struct HoldingRecord {
    account: Option<String>,
    number: Option<String>,
    currency: Option<String>,
    cost_currency: Option<String>,
    book_value: Option<String>,
    market_value: Option<String>,
    price_currency: Option<String>,
}

/// Loads holdings from a CSV file.
pub fn load_holdings(path: impl AsRef<Path>) -> CliResult<Vec<Holding>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let holdings = read_holdings(file)?;
    debug!("loaded {} holdings from {}", holdings.len(), path.display());
    Ok(holdings)
}

/// Reads holdings from any CSV source with a header row.
pub fn read_holdings<R: Read>(reader: R) -> CliResult<Vec<Holding>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut holdings = Vec::new();
    for result in reader.records() {
        let record = result?;
        // Line the record starts on; quoted cells may span lines
        let line = record.position().map_or(0, csv::Position::line);
        let row: HoldingRecord = record.deserialize(Some(&headers))?;
        holdings.push(to_holding(row, line)?);
    }
    Ok(holdings)
}

fn to_holding(record: HoldingRecord, line: u64) -> CliResult<Holding> {
    let account = non_empty(record.account).ok_or_else(|| CliError::InvalidHolding {
        line,
        reason: "missing account".to_string(),
    })?;

    let mut builder = Holding::builder().account(account);
    if let Some(currency) = non_empty(record.currency) {
        builder = builder.currency(currency);
    }
    if let Some(cost) = non_empty(record.cost_currency) {
        builder = builder.cost_currency(cost);
    }
    if let Some(units) = parse_decimal("number", record.number, line)? {
        builder = builder.units(units);
    }
    if let Some(book) = parse_decimal("book_value", record.book_value, line)? {
        builder = builder.book_value(book);
    }
    if let Some(value) = parse_decimal("market_value", record.market_value, line)? {
        builder = builder.market_value(value);
    }
    if let Some(price_currency) = non_empty(record.price_currency) {
        builder = builder.price_currency(price_currency);
    }

    builder.build().map_err(|e| CliError::InvalidHolding {
        line,
        reason: e.to_string(),
    })
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.is_empty())
}

fn parse_decimal(column: &'static str, cell: Option<String>, line: u64) -> CliResult<Option<Decimal>> {
    let Some(raw) = non_empty(cell) else {
        return Ok(None);
    };
    Decimal::from_str(&raw.replace(',', ""))
        .map(Some)
        .map_err(|_| CliError::InvalidNumber {
            column,
            line,
            value: raw,
        })
}

/// Checks that every priced holding is valued in the reporting currency.
///
/// Holdings without a price currency are assumed to already be in it.
pub fn ensure_currency(holdings: &[Holding], currency: &str) -> CliResult<()> {
    for holding in holdings.iter().filter(|h| h.is_priced()) {
        match holding.price_currency.as_deref() {
            Some(got) if got != currency => {
                return Err(CliError::CurrencyMismatch {
                    account: holding.account.clone(),
                    expected: currency.to_string(),
                    got: got.to_string(),
                });
            }
            Some(_) => {}
            None => warn!(
                "holding '{}' has no price currency, assuming {currency}",
                holding.account
            ),
        }
    }
    Ok(())
}
