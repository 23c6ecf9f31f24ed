//! Domain types for holdings classification.
//!
//! - [`Holding`]: A single monetary position
//! - [`FeatureVector`]: Label to relative weight
//! - [`ClassificationTable`]: Ordered key to feature vector mapping
//! - [`AllotConfig`]: Configuration for aggregation

mod config;
mod feature;
mod holding;
mod table;

// Re-export all types
pub use config::AllotConfig;
pub use feature::FeatureVector;
pub use holding::{Holding, HoldingBuilder};
pub use table::{ClassificationTable, TableEntry};
