//! Classification tables derived from the holdings themselves.

use crate::error::AllotResult;
use crate::types::{ClassificationTable, FeatureVector, Holding};
use std::collections::HashMap;

/// Builds a table mapping each holding's commodity to its cost currency.
///
/// Produces `{currency: {cost_currency: 1}}`; pair it with an
/// [`ExactKeyResolver`](super::ExactKeyResolver) on
/// [`HoldingField::Currency`](super::HoldingField::Currency) to break a
/// portfolio down by the currency positions were bought in. Holdings without
/// a cost currency (plain cash) map to their own commodity. When a commodity
/// appears more than once, the last holding decides the cost currency but
/// the key keeps the position of its first appearance. Holdings with an
/// empty commodity are ignored.
///
/// # Errors
///
/// Never fails for well-formed holdings; the result type mirrors table
/// construction.
pub fn cost_currency_table(holdings: &[Holding]) -> AllotResult<ClassificationTable> {
    let mut order: Vec<&str> = Vec::new();
    let mut cost_by_currency: HashMap<&str, &str> = HashMap::new();

    for holding in holdings.iter().filter(|h| !h.currency.is_empty()) {
        let currency = holding.currency.as_str();
        let cost = holding.cost_currency.as_deref().unwrap_or(currency);
        if cost_by_currency.insert(currency, cost).is_none() {
            order.push(currency);
        }
    }

    let mut table = ClassificationTable::new();
    for currency in order {
        table.insert(currency, FeatureVector::single(cost_by_currency[currency]))?;
    }
    Ok(table)
}
