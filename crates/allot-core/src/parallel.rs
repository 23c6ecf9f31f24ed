//! Parallel processing utilities.
//!
//! Provides conditional parallel iteration based on configuration
//! and collection size. Uses rayon when the `parallel` feature is enabled.

use crate::types::AllotConfig;

/// Folds over items (with their index) and reduces the partial results,
/// conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// `reduce` must be associative, since shards are combined in an
/// unspecified grouping.
///
/// # Arguments
///
/// * `items` - The collection to process
/// * `config` - Aggregation configuration
/// * `identity` - Produces the starting value of each shard
/// * `fold` - The fold function: `(accumulator, index, item) -> accumulator`
/// * `reduce` - The reduce function: `(acc1, acc2) -> combined`
#[allow(unused_variables)]
pub fn maybe_parallel_fold<T, U, I, F, R>(
    items: &[T],
    config: &AllotConfig,
    identity: I,
    fold: F,
    reduce: R,
) -> U
where
    T: Sync,
    U: Send,
    I: Fn() -> U + Sync + Send,
    F: Fn(U, usize, &T) -> U + Sync + Send,
    R: Fn(U, U) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items
                .par_iter()
                .enumerate()
                .fold(&identity, |acc, (i, item)| fold(acc, i, item))
                .reduce(&identity, reduce);
        }
    }

    items
        .iter()
        .enumerate()
        .fold(identity(), |acc, (i, item)| fold(acc, i, item))
}
