//! CLI command implementations.

pub mod currencies;
pub mod report;

// Re-export submodules for convenience
pub use currencies::CurrenciesArgs;
pub use report::ReportArgs;

use crate::error::{CliError, CliResult};

/// Validates a reporting currency code.
pub fn parse_currency(code: &str) -> CliResult<String> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CliError::InvalidCurrency(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}
