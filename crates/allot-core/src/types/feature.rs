//! Feature vectors: label to relative weight.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from label to relative weight.
///
/// Weights are relative; they are rescaled to sum to one before a holding's
/// value is split across the labels. Labels are kept sorted so iteration is
/// deterministic, but order carries no meaning.
///
/// # Examples
///
/// ```
/// use allot_core::types::FeatureVector;
/// use rust_decimal_macros::dec;
///
/// let v = FeatureVector::new()
///     .with_weight("Bond", dec!(80))
///     .with_weight("Cash", dec!(20));
///
/// assert_eq!(v.len(), 2);
/// assert_eq!(v.total(), dec!(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    weights: BTreeMap<String, Decimal>,
}

impl FeatureVector {
    /// Creates an empty feature vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vector assigning the full weight to a single label.
    #[must_use]
    pub fn single(label: impl Into<String>) -> Self {
        Self::new().with_weight(label, Decimal::ONE)
    }

    /// Adds (or replaces) a label's weight.
    #[must_use]
    pub fn with_weight(mut self, label: impl Into<String>, weight: Decimal) -> Self {
        self.insert(label, weight);
        self
    }

    /// Inserts a label's weight, returning the previous weight if any.
    pub fn insert(&mut self, label: impl Into<String>, weight: Decimal) -> Option<Decimal> {
        self.weights.insert(label.into(), weight)
    }

    /// Returns the weight for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.weights.get(label).copied()
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the vector has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the sum of all weights, saturating at the decimal range.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.weights
            .values()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(*w))
    }

    /// Returns the sum of all weights, or `None` if it overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.weights
            .values()
            .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
    }

    /// Iterates over labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Iterates over `(label, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }
}

impl<L: Into<String>> FromIterator<(L, Decimal)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (L, Decimal)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(l, w)| (l.into(), w)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = (&'a String, &'a Decimal);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.iter()
    }
}
