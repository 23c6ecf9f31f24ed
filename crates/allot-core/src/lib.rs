//! # Allot Core
//!
//! Weighted classification of portfolio holdings.
//!
//! This crate splits the market value of each holding across a set of labels
//! (asset classes, regions, currencies, ...) and accumulates per-label totals.
//! Which split applies to a holding is decided by a pluggable key resolver,
//! typically by matching the holding's account name against account prefixes.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Caller-owned inputs**: Holdings and tables are read, never mutated
//! - **All-or-nothing**: A failing holding aborts the whole aggregation
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use allot_core::prelude::*;
//!
//! let table = ClassificationTable::new()
//!     .with_entry("Assets:Stock", FeatureVector::single("Equity"))?
//!     .with_entry(
//!         "Assets:Balanced",
//!         FeatureVector::new()
//!             .with_weight("Equity", dec!(60))
//!             .with_weight("Bond", dec!(40)),
//!     )?;
//!
//! let holdings = vec![
//!     Holding::builder().account("Assets:Stock:VTI").market_value(dec!(1000)).build()?,
//!     Holding::builder().account("Assets:Balanced:VBAL").market_value(dec!(500)).build()?,
//! ];
//!
//! let result = aggregate(&holdings, &table, &PrefixKeyResolver)?;
//! assert_eq!(result.get("Equity"), Some(dec!(1300)));
//! assert_eq!(result.get("Bond"), Some(dec!(200)));
//! # Ok::<(), AllotError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`join`] - Normalization, key resolvers, and aggregation
//! - [`types`] - Core types (Holding, FeatureVector, ClassificationTable, Config)
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large holding lists

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod error;
pub mod join;
mod parallel;
pub mod types;

// Re-export error types at crate root
pub use error::{AllotError, AllotResult};

// Re-export main types
pub use types::{
    AllotConfig, ClassificationTable, FeatureVector, Holding, HoldingBuilder, TableEntry,
};

// Re-export join types and functions
pub use join::{
    aggregate, aggregate_with_config, cost_currency_table, normalize_features, normalize_table,
    AggregationResult, ExactKeyResolver, FnResolver, HoldingField, KeyResolver,
    LongestPrefixResolver, PrefixKeyResolver, ReportRow,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use allot_core::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{AllotError, AllotResult};

    // Domain types
    pub use crate::types::{AllotConfig, ClassificationTable, FeatureVector, Holding};

    // Join
    pub use crate::join::{
        aggregate, aggregate_with_config, normalize_features, AggregationResult,
        ExactKeyResolver, HoldingField, KeyResolver, PrefixKeyResolver,
    };

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
