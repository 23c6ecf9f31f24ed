//! Holding representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single monetary position.
///
/// Only [`account`](Holding::account) and [`market_value`](Holding::market_value)
/// take part in aggregation; the remaining fields are carried for key
/// resolvers and reporting. Values are expected to be expressed in a single
/// reporting currency already.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Account identifier, e.g. `Assets:Broker:VTI`.
    pub account: String,

    /// Number of units held.
    pub units: Option<Decimal>,

    /// Commodity or currency of the units (e.g. `VTI`, `USD`).
    pub currency: String,

    /// Currency the position was purchased in.
    pub cost_currency: Option<String>,

    /// Total cost basis, in `cost_currency`.
    pub book_value: Option<Decimal>,

    /// Market value. `None` for unpriced instruments.
    pub market_value: Option<Decimal>,

    /// Currency of `market_value`.
    pub price_currency: Option<String>,
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Returns the market value if present and non-zero.
    #[must_use]
    pub fn contributing_value(&self) -> Option<Decimal> {
        self.market_value.filter(|mv| !mv.is_zero())
    }

    /// Returns true if the holding carries a market value.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.market_value.is_some()
    }
}

/// Builder for constructing a Holding.
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    account: Option<String>,
    units: Option<Decimal>,
    currency: Option<String>,
    cost_currency: Option<String>,
    book_value: Option<Decimal>,
    market_value: Option<Decimal>,
    price_currency: Option<String>,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account identifier.
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Sets the number of units.
    #[must_use]
    pub fn units(mut self, units: Decimal) -> Self {
        self.units = Some(units);
        self
    }

    /// Sets the commodity of the units.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the cost currency.
    #[must_use]
    pub fn cost_currency(mut self, currency: impl Into<String>) -> Self {
        self.cost_currency = Some(currency.into());
        self
    }

    /// Sets the book value.
    #[must_use]
    pub fn book_value(mut self, value: Decimal) -> Self {
        self.book_value = Some(value);
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn market_value(mut self, value: Decimal) -> Self {
        self.market_value = Some(value);
        self
    }

    /// Sets the currency of the market value.
    #[must_use]
    pub fn price_currency(mut self, currency: impl Into<String>) -> Self {
        self.price_currency = Some(currency.into());
        self
    }

    /// Builds the holding.
    ///
    /// The commodity defaults to an empty string when not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or empty.
    pub fn build(self) -> crate::AllotResult<Holding> {
        let account = self
            .account
            .filter(|a| !a.is_empty())
            .ok_or_else(|| crate::AllotError::missing_field("account"))?;

        Ok(Holding {
            account,
            units: self.units,
            currency: self.currency.unwrap_or_default(),
            cost_currency: self.cost_currency,
            book_value: self.book_value,
            market_value: self.market_value,
            price_currency: self.price_currency,
        })
    }
}
