//! Property-based tests for aggregation invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Normalized weights sum to one
//! - Normalization is idempotent
//! - Unvalued holdings contribute nothing
//! - Value is conserved across label buckets

use allot_core::prelude::*;
use allot_core::LongestPrefixResolver;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;

// =============================================================================
// STRATEGIES
// =============================================================================

const LABELS: [&str; 6] = ["Equity", "Bond", "Cash", "Gold", "Real Estate", "Crypto"];
const PREFIXES: [&str; 5] = ["Assets:A", "Assets:B", "Assets:C", "Assets:A:X", "Assets:D"];

/// Weights in cents, so every draw is an exact decimal.
fn weight() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn feature_vector() -> impl Strategy<Value = FeatureVector> {
    prop::collection::btree_map(prop::sample::select(LABELS.to_vec()), weight(), 1..LABELS.len())
        .prop_map(|m| m.into_iter().collect())
}

fn table() -> impl Strategy<Value = ClassificationTable> {
    prop::collection::vec(feature_vector(), PREFIXES.len()).prop_map(|vectors| {
        let mut table = ClassificationTable::new();
        for (key, v) in PREFIXES.iter().zip(vectors) {
            table.insert(*key, v).unwrap();
        }
        table
    })
}

fn holding() -> impl Strategy<Value = Holding> {
    (
        prop::sample::select(PREFIXES.to_vec()),
        "[A-Z]{1,5}",
        prop::option::of((-1_000_000i64..100_000_000).prop_map(|c| Decimal::new(c, 2))),
    )
        .prop_map(|(prefix, ticker, mv)| {
            let mut builder = Holding::builder()
                .account(format!("{prefix}:{ticker}"))
                .currency(ticker);
            if let Some(v) = mv {
                builder = builder.market_value(v);
            }
            builder.build().unwrap()
        })
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(v in feature_vector()) {
        let n = normalize_features(&v).unwrap();
        assert_abs_diff_eq!(to_f64(n.total()), 1.0, epsilon = 1e-9);
        prop_assert_eq!(n.labels().collect::<Vec<_>>(), v.labels().collect::<Vec<_>>());
    }

    #[test]
    fn normalization_is_idempotent(v in feature_vector()) {
        let once = normalize_features(&v).unwrap();
        let twice = normalize_features(&once).unwrap();
        for (label, w) in once.iter() {
            let w2 = twice.get(label).unwrap();
            assert_abs_diff_eq!(to_f64(w), to_f64(w2), epsilon = 1e-9);
        }
    }

    #[test]
    fn scaling_does_not_change_normalization(v in feature_vector(), k in 1i64..1_000) {
        let scaled: FeatureVector = v.iter().map(|(l, w)| (l, w * Decimal::from(k))).collect();
        let a = normalize_features(&v).unwrap();
        let b = normalize_features(&scaled).unwrap();
        for (label, w) in a.iter() {
            assert_abs_diff_eq!(to_f64(w), to_f64(b.get(label).unwrap()), epsilon = 1e-9);
        }
    }

    #[test]
    fn unvalued_holding_contributes_nothing(t in table(), prefix in prop::sample::select(PREFIXES.to_vec()), zero in any::<bool>()) {
        let mut builder = Holding::builder().account(format!("{prefix}:POS"));
        if zero {
            builder = builder.market_value(Decimal::ZERO);
        }
        let h = builder.build().unwrap();

        let result = aggregate(&[h], &t, &PrefixKeyResolver).unwrap();
        prop_assert!(result.is_zero());
        prop_assert_eq!(result.len(), t.labels().len());
    }

    #[test]
    fn value_is_conserved(t in table(), holdings in prop::collection::vec(holding(), 0..40)) {
        let expected: Decimal = holdings.iter().filter_map(Holding::contributing_value).sum();

        for result in [
            aggregate(&holdings, &t, &PrefixKeyResolver).unwrap(),
            aggregate(&holdings, &t, &LongestPrefixResolver).unwrap(),
        ] {
            prop_assert!((result.total() - expected).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn label_universe_is_table_labels(t in table(), holdings in prop::collection::vec(holding(), 0..10)) {
        let result = aggregate(&holdings, &t, &PrefixKeyResolver).unwrap();
        let labels: Vec<_> = result.iter().map(|(l, _)| l.to_string()).collect();
        let expected: Vec<_> = t.labels().into_iter().map(str::to_string).collect();
        prop_assert_eq!(labels, expected);
    }

    #[test]
    fn config_does_not_change_totals(t in table(), holdings in prop::collection::vec(holding(), 0..60)) {
        let sequential = aggregate(&holdings, &t, &PrefixKeyResolver).unwrap();
        let configured = aggregate_with_config(
            &holdings,
            &t,
            &PrefixKeyResolver,
            &AllotConfig::default().with_threshold(4),
        )
        .unwrap();
        for (label, total) in sequential.iter() {
            let other = configured.get(label).unwrap();
            prop_assert!((total - other).abs() < dec!(0.000001));
        }
    }
}
