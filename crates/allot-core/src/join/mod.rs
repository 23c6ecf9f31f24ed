//! Weighted classification of holdings.
//!
//! This module joins a list of holdings with a [`ClassificationTable`]:
//!
//! - **Normalization**: feature vectors are rescaled to sum to one
//! - **Key resolution**: a [`KeyResolver`] picks the table key for a holding
//! - **Aggregation**: each holding's market value is split across labels
//!
//! All functions are pure - they take holdings and return totals
//! without modifying state.
//!
//! # Example
//!
//! ```rust,ignore
//! use allot_core::join::*;
//!
//! let result = aggregate(&holdings, &table, &PrefixKeyResolver)?;
//! for row in result.breakdown() {
//!     println!("{}: {:.2} ({:.1}%)", row.label, row.value, row.fraction * dec!(100));
//! }
//! ```
//!
//! [`ClassificationTable`]: crate::types::ClassificationTable

mod aggregate;
mod derive;
mod normalize;
mod resolver;
mod result;

pub use aggregate::*;
pub use derive::*;
pub use normalize::*;
pub use resolver::*;
pub use result::*;
