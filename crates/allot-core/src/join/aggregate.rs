//! Weighted join of holdings against a classification table.
//!
//! Each holding is matched to a feature vector through a [`KeyResolver`],
//! and its market value is split across the vector's labels in proportion
//! to the normalized weights.

use super::normalize::normalize_table;
use super::resolver::KeyResolver;
use super::result::AggregationResult;
use crate::error::{AllotError, AllotResult};
use crate::parallel::maybe_parallel_fold;
use crate::types::{AllotConfig, ClassificationTable, Holding};
use log::{debug, trace};

/// Aggregates holdings into per-label totals.
///
/// Steps:
/// 1. Every label in `table` starts at zero in the result.
/// 2. Every feature vector is normalized once, up front.
/// 3. Each holding, in order, is resolved to a key; its market value times
///    each normalized weight is added to the corresponding label.
///
/// Holdings without a market value (or with a zero one) contribute nothing
/// but must still resolve.
///
/// # Errors
///
/// - [`AllotError::DegenerateVector`] if any vector in `table` is empty or
///   sums to zero; no holding is looked at in that case.
/// - [`AllotError::UnresolvedKey`] for the first holding whose key is missing
///   or not in `table`.
/// - [`AllotError::Overflow`] if a label total, or the sum of all totals,
///   leaves the decimal range.
///
/// Any error aborts the whole call; no partial result is returned.
///
/// # Example
///
/// ```
/// use allot_core::join::{aggregate, PrefixKeyResolver};
/// use allot_core::types::{ClassificationTable, FeatureVector, Holding};
/// use rust_decimal_macros::dec;
///
/// let table = ClassificationTable::new().with_entry(
///     "Assets:Bond",
///     FeatureVector::new()
///         .with_weight("Bond", dec!(0.8))
///         .with_weight("Cash", dec!(0.2)),
/// )?;
/// let holdings = vec![Holding::builder()
///     .account("Assets:Bond:US10Y")
///     .market_value(dec!(500))
///     .build()?];
///
/// let result = aggregate(&holdings, &table, &PrefixKeyResolver)?;
/// assert_eq!(result.get("Bond"), Some(dec!(400)));
/// assert_eq!(result.get("Cash"), Some(dec!(100)));
/// # Ok::<(), allot_core::AllotError>(())
/// ```
pub fn aggregate<R>(
    holdings: &[Holding],
    table: &ClassificationTable,
    resolver: &R,
) -> AllotResult<AggregationResult>
where
    R: KeyResolver + ?Sized,
{
    let normalized = prepare(holdings, table)?;
    let mut result = AggregationResult::with_labels(table.labels());

    for (index, holding) in holdings.iter().enumerate() {
        accumulate(&mut result, index, holding, table, &normalized, resolver)?;
    }

    finish(result)
}

/// Aggregates holdings, sharding the work across threads when `config`
/// allows it.
///
/// Produces exactly the same totals as [`aggregate`]. When several holdings
/// fail to resolve, the error reports the one with the lowest index. When an
/// input both overflows and holds unresolved keys, either error may be
/// reported depending on how the holdings were sharded.
///
/// # Errors
///
/// Same as [`aggregate`].
pub fn aggregate_with_config<R>(
    holdings: &[Holding],
    table: &ClassificationTable,
    resolver: &R,
    config: &AllotConfig,
) -> AllotResult<AggregationResult>
where
    R: KeyResolver + Sync + ?Sized,
{
    let normalized = prepare(holdings, table)?;
    let labels = table.labels();

    let mut result = maybe_parallel_fold(
        holdings,
        config,
        || Ok(AggregationResult::default()),
        |acc: AllotResult<AggregationResult>, index, holding| {
            let mut partial = acc?;
            accumulate(&mut partial, index, holding, table, &normalized, resolver)?;
            Ok(partial)
        },
        |a, b| match (a, b) {
            (Ok(mut a), Ok(b)) => {
                a.merge(b)?;
                Ok(a)
            }
            (Err(a), Err(b)) => Err(first_failure(a, b)),
            (Err(e), _) | (_, Err(e)) => Err(e),
        },
    )?;

    result.merge(AggregationResult::with_labels(labels))?;
    finish(result)
}

/// Normalizes the table and logs the shape of the run.
fn prepare(holdings: &[Holding], table: &ClassificationTable) -> AllotResult<ClassificationTable> {
    let normalized = normalize_table(table)?;
    debug!(
        "aggregating {} holdings over {} keys ({} labels)",
        holdings.len(),
        table.len(),
        table.labels().len()
    );
    Ok(normalized)
}

/// Rejects results whose grand total is out of range.
fn finish(result: AggregationResult) -> AllotResult<AggregationResult> {
    if result.checked_total().is_none() {
        return Err(AllotError::Overflow { label: None });
    }
    Ok(result)
}

/// Resolves one holding and adds its weighted value into `result`.
fn accumulate<R>(
    result: &mut AggregationResult,
    index: usize,
    holding: &Holding,
    table: &ClassificationTable,
    normalized: &ClassificationTable,
    resolver: &R,
) -> AllotResult<()>
where
    R: KeyResolver + ?Sized,
{
    let key = resolver.resolve(table, holding);
    let Some(features) = key.as_deref().and_then(|k| normalized.get(k)) else {
        return Err(AllotError::unresolved(
            index,
            holding.account.as_str(),
            key.map(|k| k.into_owned()),
            table.keys().map(str::to_string).collect(),
        ));
    };

    let Some(value) = holding.contributing_value() else {
        trace!("holding #{index} ({}) has no market value, skipped", holding.account);
        return Ok(());
    };

    trace!(
        "holding #{index} ({}) -> {:?}: {value}",
        holding.account,
        key.as_deref()
    );
    for (label, fraction) in features.iter() {
        result.add(label, value * fraction)?;
    }
    Ok(())
}

/// Picks the error belonging to the earlier holding.
fn first_failure(a: AllotError, b: AllotError) -> AllotError {
    match (&a, &b) {
        (
            AllotError::UnresolvedKey { index: ia, .. },
            AllotError::UnresolvedKey { index: ib, .. },
        ) if ib < ia => b,
        (AllotError::UnresolvedKey { .. }, _) => a,
        (_, AllotError::UnresolvedKey { .. }) => b,
        _ => a,
    }
}
