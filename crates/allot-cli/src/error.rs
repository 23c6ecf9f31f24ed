//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A holding is valued in a currency other than the reporting one.
    #[error(
        "Holding '{account}' is valued in {got}, expected {expected}. \
         Convert holdings to the reporting currency first."
    )]
    CurrencyMismatch {
        /// The holding's account.
        account: String,
        /// The reporting currency.
        expected: String,
        /// The holding's price currency.
        got: String,
    },

    /// Reporting currency is not a currency code.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// A numeric column could not be parsed.
    #[error("Invalid number in column '{column}' on line {line}: '{value}'")]
    InvalidNumber {
        /// Column name.
        column: &'static str,
        /// 1-based line number in the file, header included.
        line: u64,
        /// The raw cell content.
        value: String,
    },

    /// A holdings record is malformed.
    #[error("Invalid holding on line {line}: {reason}")]
    InvalidHolding {
        /// 1-based line number in the file, header included.
        line: u64,
        /// What is wrong.
        reason: String,
    },

    /// Rules file could not be parsed or is inconsistent.
    #[error("Invalid rules file: {0}")]
    Rules(String),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
