//! Feature vector normalization.

use crate::error::{AllotError, AllotResult};
use crate::types::{ClassificationTable, FeatureVector};
use rust_decimal::Decimal;

/// Rescales a feature vector so its weights sum to one.
///
/// Every label keeps its place; its weight becomes `weight / total`. A vector
/// that already sums to exactly one is returned as is, so normalizing twice
/// gives the same weights as normalizing once.
///
/// # Errors
///
/// Returns [`AllotError::DegenerateVector`] if the vector is empty, its
/// weights sum to zero or less, or the sum overflows.
///
/// # Examples
///
/// ```
/// use allot_core::join::normalize_features;
/// use allot_core::types::FeatureVector;
/// use rust_decimal_macros::dec;
///
/// let v = FeatureVector::new()
///     .with_weight("Bond", dec!(3))
///     .with_weight("Cash", dec!(1));
/// let n = normalize_features(&v)?;
///
/// assert_eq!(n.get("Bond"), Some(dec!(0.75)));
/// assert_eq!(n.get("Cash"), Some(dec!(0.25)));
/// # Ok::<(), allot_core::AllotError>(())
/// ```
pub fn normalize_features(features: &FeatureVector) -> AllotResult<FeatureVector> {
    let total = features.checked_total().ok_or_else(AllotError::unsummable)?;
    if features.is_empty() || total <= Decimal::ZERO {
        return Err(AllotError::degenerate(total));
    }
    if total == Decimal::ONE {
        return Ok(features.clone());
    }

    Ok(features
        .iter()
        .map(|(label, weight)| (label, weight / total))
        .collect())
}

/// Normalizes every vector of a table, preserving key order.
///
/// The caller's table is left untouched.
///
/// # Errors
///
/// Returns [`AllotError::DegenerateVector`] naming the first key (in table
/// order) whose vector cannot be normalized.
pub fn normalize_table(table: &ClassificationTable) -> AllotResult<ClassificationTable> {
    let mut normalized = ClassificationTable::new();
    for (key, features) in table.iter() {
        let weights = normalize_features(features).map_err(|e| e.for_key(key))?;
        normalized.insert(key, weights)?;
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_simple() {
        let v = FeatureVector::new()
            .with_weight("Bond", dec!(80))
            .with_weight("Cash", dec!(20));
        let n = normalize_features(&v).unwrap();

        assert_eq!(n.get("Bond"), Some(dec!(0.8)));
        assert_eq!(n.get("Cash"), Some(dec!(0.2)));
        assert_eq!(n.total(), Decimal::ONE);
    }

    #[test]
    fn test_normalize_preserves_labels() {
        let v = FeatureVector::new()
            .with_weight("A", dec!(1))
            .with_weight("B", Decimal::ZERO)
            .with_weight("C", dec!(2));
        let n = normalize_features(&v).unwrap();

        assert_eq!(n.labels().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(n.get("B"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_normalize_thirds() {
        let v = FeatureVector::new()
            .with_weight("A", dec!(1))
            .with_weight("B", dec!(1))
            .with_weight("C", dec!(1));
        let n = normalize_features(&v).unwrap();

        assert!((n.total() - Decimal::ONE).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_normalize_already_normalized() {
        let v = FeatureVector::new()
            .with_weight("Bond", dec!(0.8))
            .with_weight("Cash", dec!(0.2));
        let n = normalize_features(&v).unwrap();
        assert_eq!(n, v);
        assert_eq!(normalize_features(&n).unwrap(), n);
    }

    #[test]
    fn test_empty_vector_is_degenerate() {
        let err = normalize_features(&FeatureVector::new()).unwrap_err();
        assert_eq!(err, AllotError::degenerate(Decimal::ZERO));
    }

    #[test]
    fn test_zero_sum_is_degenerate() {
        let v = FeatureVector::new()
            .with_weight("A", Decimal::ZERO)
            .with_weight("B", Decimal::ZERO);
        assert!(matches!(
            normalize_features(&v),
            Err(AllotError::DegenerateVector { key: None, .. })
        ));
    }

    #[test]
    fn test_overflowing_sum_is_degenerate() {
        let v = FeatureVector::new()
            .with_weight("A", Decimal::MAX)
            .with_weight("B", Decimal::MAX);
        assert_eq!(normalize_features(&v).unwrap_err(), AllotError::unsummable());
    }

    #[test]
    fn test_large_weights_normalize() {
        let quarter = Decimal::MAX / dec!(4);
        let v = FeatureVector::new()
            .with_weight("A", quarter)
            .with_weight("B", quarter);
        let n = normalize_features(&v).unwrap();
        assert_eq!(n.get("A"), Some(dec!(0.5)));
        assert_eq!(n.get("B"), Some(dec!(0.5)));
    }

    #[test]
    fn test_normalize_table_names_key() {
        let table = ClassificationTable::new()
            .with_entry("Assets:Stock", FeatureVector::single("Equity"))
            .unwrap()
            .with_entry("Assets:Void", FeatureVector::new())
            .unwrap();

        let err = normalize_table(&table).unwrap_err();
        assert_eq!(
            err,
            AllotError::DegenerateVector {
                key: Some("Assets:Void".to_string()),
                sum: Some(Decimal::ZERO),
            }
        );
    }

    #[test]
    fn test_normalize_table_keeps_order() {
        let table = ClassificationTable::new()
            .with_entry("B", FeatureVector::new().with_weight("X", dec!(4)))
            .unwrap()
            .with_entry("A", FeatureVector::new().with_weight("Y", dec!(2)))
            .unwrap();

        let normalized = normalize_table(&table).unwrap();
        assert_eq!(normalized.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(normalized.get("B").unwrap().get("X"), Some(Decimal::ONE));
        // The source table is unchanged
        assert_eq!(table.get("B").unwrap().get("X"), Some(dec!(4)));
    }
}
