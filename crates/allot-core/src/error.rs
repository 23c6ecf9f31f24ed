//! Error types for holdings classification.
//!
//! This module defines the error types used throughout the allot crate.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for classification operations.
pub type AllotResult<T> = Result<T, AllotError>;

/// Errors that can occur while building tables or aggregating holdings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllotError {
    /// A feature vector cannot be normalized (empty, weights sum to <= 0,
    /// or the sum is out of decimal range).
    #[error(
        "Degenerate feature vector{}: weights sum to {}",
        .key.as_deref().map_or_else(String::new, |k| format!(" for key '{k}'")),
        .sum.map_or_else(|| "more than the decimal range holds".to_string(), |s| s.to_string())
    )]
    DegenerateVector {
        /// The classification key owning the vector, when known.
        key: Option<String>,
        /// The sum of the vector's weights; `None` when it overflows.
        sum: Option<Decimal>,
    },

    /// A holding could not be matched to any classification key.
    #[error(
        "Key {} for holding #{index} (account '{account}') not found in mapping: {available:?}",
        .key.as_deref().map_or_else(|| "<none>".to_string(), |k| format!("'{k}'"))
    )]
    UnresolvedKey {
        /// Position of the holding in the input sequence.
        index: usize,
        /// The holding's account identifier.
        account: String,
        /// The key returned by the resolver, if any.
        key: Option<String>,
        /// Keys available in the classification table.
        available: Vec<String>,
    },

    /// A feature weight is negative.
    #[error("Invalid weight for '{label}' under key '{key}': {weight}")]
    InvalidWeight {
        /// The classification key.
        key: String,
        /// The label carrying the weight.
        label: String,
        /// The offending weight.
        weight: Decimal,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// An accumulated total left the decimal range.
    #[error(
        "Aggregated value overflows{}",
        .label.as_deref().map_or_else(|| " the result total".to_string(), |l| format!(" for label '{l}'"))
    )]
    Overflow {
        /// The label whose total overflowed; `None` for the grand total.
        label: Option<String>,
    },

    /// A classification key was inserted twice.
    #[error("Duplicate classification key: {key}")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

impl AllotError {
    /// Create a degenerate vector error.
    #[must_use]
    pub fn degenerate(sum: Decimal) -> Self {
        Self::DegenerateVector {
            key: None,
            sum: Some(sum),
        }
    }

    /// Create a degenerate vector error for weights whose sum overflows.
    #[must_use]
    pub fn unsummable() -> Self {
        Self::DegenerateVector {
            key: None,
            sum: None,
        }
    }

    /// Create an overflow error for a label total.
    #[must_use]
    pub fn overflow(label: impl Into<String>) -> Self {
        Self::Overflow {
            label: Some(label.into()),
        }
    }

    /// Attaches a classification key to a degenerate vector error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn for_key(self, key: impl Into<String>) -> Self {
        match self {
            Self::DegenerateVector { sum, .. } => Self::DegenerateVector {
                key: Some(key.into()),
                sum,
            },
            other => other,
        }
    }

    /// Create an unresolved key error.
    #[must_use]
    pub fn unresolved(
        index: usize,
        account: impl Into<String>,
        key: Option<String>,
        available: Vec<String>,
    ) -> Self {
        Self::UnresolvedKey {
            index,
            account: account.into(),
            key,
            available,
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a duplicate key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = AllotError::degenerate(Decimal::ZERO);
        assert_eq!(err.to_string(), "Degenerate feature vector: weights sum to 0");

        let err = err.for_key("Assets:Cash");
        assert!(err.to_string().contains("for key 'Assets:Cash'"));

        let err = AllotError::unsummable().for_key("Assets:Huge");
        assert_eq!(
            err.to_string(),
            "Degenerate feature vector for key 'Assets:Huge': weights sum to more than the decimal range holds"
        );

        let err = AllotError::overflow("Equity");
        assert_eq!(err.to_string(), "Aggregated value overflows for label 'Equity'");
        let err = AllotError::Overflow { label: None };
        assert_eq!(err.to_string(), "Aggregated value overflows the result total");

        let err = AllotError::unresolved(
            3,
            "Assets:Broker:VTI",
            None,
            vec!["Assets:Bank".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("<none>"));
        assert!(msg.contains("#3"));
        assert!(msg.contains("Assets:Broker:VTI"));
        assert!(msg.contains("Assets:Bank"));

        let err = AllotError::unresolved(0, "X", Some("EUR".to_string()), vec![]);
        assert!(err.to_string().contains("'EUR'"));

        let err = AllotError::InvalidWeight {
            key: "K".to_string(),
            label: "Bond".to_string(),
            weight: dec!(-1),
        };
        assert!(err.to_string().contains("Bond"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_error_clone() {
        let err = AllotError::duplicate_key("Assets");
        let cloned = err.clone();
        assert_eq!(err, cloned);
        assert_eq!(err.to_string(), "Duplicate classification key: Assets");
    }
}
