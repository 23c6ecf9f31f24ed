//! Aggregation results.

use crate::error::{AllotError, AllotResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated value per label.
///
/// Every label appearing anywhere in the classification table is present,
/// including labels no holding contributed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult {
    totals: BTreeMap<String, Decimal>,
}

/// One line of a breakdown: a label, its value, and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The label.
    pub label: String,

    /// Accumulated value.
    pub value: Decimal,

    /// Share of the result total (0-1). Zero when the total is zero.
    pub fraction: Decimal,
}

impl AggregationResult {
    /// Creates a result with every label set to zero.
    #[must_use]
    pub fn with_labels<'l>(labels: impl IntoIterator<Item = &'l str>) -> Self {
        Self {
            totals: labels
                .into_iter()
                .map(|l| (l.to_string(), Decimal::ZERO))
                .collect(),
        }
    }

    /// Adds `amount` to a label's total, creating the label if needed.
    pub(crate) fn add(&mut self, label: &str, amount: Decimal) -> AllotResult<()> {
        match self.totals.get_mut(label) {
            Some(total) => {
                *total = total
                    .checked_add(amount)
                    .ok_or_else(|| AllotError::overflow(label))?;
            }
            None => {
                self.totals.insert(label.to_string(), amount);
            }
        }
        Ok(())
    }

    /// Folds another partial result into this one.
    pub(crate) fn merge(&mut self, other: Self) -> AllotResult<()> {
        for (label, amount) in other.totals {
            self.add(&label, amount)?;
        }
        Ok(())
    }

    /// Returns the total for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.totals.get(label).copied()
    }

    /// Returns the sum over all labels, saturating at the decimal range.
    ///
    /// Results produced by the aggregator never saturate.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.totals
            .values()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
    }

    /// Returns the sum over all labels, or `None` if it overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.totals
            .values()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Returns true if every total is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.totals.values().all(Decimal::is_zero)
    }

    /// Iterates over `(label, total)` pairs, sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(l, v)| (l.as_str(), *v))
    }

    /// Returns all labels with their totals, sorted by value descending.
    ///
    /// Ties are broken by label so the order is stable.
    #[must_use]
    pub fn sorted_by_value(&self) -> Vec<(&str, Decimal)> {
        let mut result: Vec<_> = self.iter().collect();
        result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        result
    }

    /// Returns the breakdown sorted by value descending, with each label's
    /// share of the total.
    #[must_use]
    pub fn breakdown(&self) -> Vec<ReportRow> {
        let total = self.total();
        self.sorted_by_value()
            .into_iter()
            .map(|(label, value)| ReportRow {
                label: label.to_string(),
                value,
                // Zero when the total is zero or the share is out of range
                fraction: value.checked_div(total).unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    /// Consumes the result, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Decimal> {
        self.totals
    }
}

impl From<AggregationResult> for BTreeMap<String, Decimal> {
    fn from(result: AggregationResult) -> Self {
        result.into_inner()
    }
}
