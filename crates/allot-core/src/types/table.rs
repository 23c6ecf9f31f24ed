//! Ordered classification tables.
//!
//! A [`ClassificationTable`] maps classification keys to [`FeatureVector`]s.
//! Entry order is the order keys were inserted in, and it matters: the
//! prefix resolver returns the *first* matching key, so callers with
//! overlapping keys must insert them in the order they want them tried.

use super::FeatureVector;
use crate::error::{AllotError, AllotResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A single `key -> feature vector` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Classification key.
    pub key: String,

    /// Weights for the key.
    pub weights: FeatureVector,
}

/// An insertion-ordered mapping from classification key to feature vector.
///
/// # Examples
///
/// ```
/// use allot_core::types::{ClassificationTable, FeatureVector};
/// use rust_decimal_macros::dec;
///
/// let table = ClassificationTable::new()
///     .with_entry("Assets:Stock", FeatureVector::single("Equity"))?
///     .with_entry(
///         "Assets:Bond",
///         FeatureVector::new()
///             .with_weight("Bond", dec!(0.8))
///             .with_weight("Cash", dec!(0.2)),
///     )?;
///
/// assert_eq!(table.keys().collect::<Vec<_>>(), vec!["Assets:Stock", "Assets:Bond"]);
/// # Ok::<(), allot_core::AllotError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TableEntry>", into = "Vec<TableEntry>")]
pub struct ClassificationTable {
    entries: Vec<TableEntry>,
    index: HashMap<String, usize>,
}

impl ClassificationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, consuming and returning the table.
    ///
    /// # Errors
    ///
    /// See [`ClassificationTable::insert`].
    pub fn with_entry(mut self, key: impl Into<String>, weights: FeatureVector) -> AllotResult<Self> {
        self.insert(key, weights)?;
        Ok(self)
    }

    /// Appends an entry at the end of the table.
    ///
    /// # Errors
    ///
    /// Returns [`AllotError::DuplicateKey`] if the key is already present and
    /// [`AllotError::InvalidWeight`] if any weight is negative.
    pub fn insert(&mut self, key: impl Into<String>, weights: FeatureVector) -> AllotResult<()> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(AllotError::duplicate_key(key));
        }
        if let Some((label, weight)) = weights.iter().find(|(_, w)| *w < Decimal::ZERO) {
            return Err(AllotError::InvalidWeight {
                key,
                label: label.to_string(),
                weight,
            });
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(TableEntry { key, weights });
        Ok(())
    }

    /// Returns the feature vector for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FeatureVector> {
        self.index.get(key).map(|&i| &self.entries[i].weights)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Iterates over `(key, vector)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureVector)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.weights))
    }

    /// Returns the union of all labels across every feature vector.
    #[must_use]
    pub fn labels(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.weights.labels())
            .collect()
    }

    /// Returns the sum of the weights stored under a key.
    #[must_use]
    pub fn weight_total(&self, key: &str) -> Option<Decimal> {
        self.get(key).map(FeatureVector::total)
    }
}

impl TryFrom<Vec<TableEntry>> for ClassificationTable {
    type Error = AllotError;

    fn try_from(entries: Vec<TableEntry>) -> AllotResult<Self> {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.key, entry.weights)?;
        }
        Ok(table)
    }
}

impl From<ClassificationTable> for Vec<TableEntry> {
    fn from(table: ClassificationTable) -> Self {
        table.entries
    }
}
