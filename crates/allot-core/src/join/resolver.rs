//! Key resolution strategies.
//!
//! A [`KeyResolver`] picks the classification key that applies to a holding.
//! The aggregator only ever talks to the trait, so any strategy can be
//! plugged in:
//!
//! - [`PrefixKeyResolver`]: first table key that prefixes the account
//! - [`LongestPrefixResolver`]: longest table key that prefixes the account
//! - [`ExactKeyResolver`]: a holding attribute used verbatim as the key
//! - [`FnResolver`]: any closure

use crate::types::{ClassificationTable, Holding};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Maps a holding to a classification key.
///
/// Returning `None` means "no key"; the aggregator turns that into an
/// [`AllotError::UnresolvedKey`](crate::AllotError::UnresolvedKey). A
/// resolver may also return a key that is not in the table, which fails the
/// same way but keeps the attempted key in the error.
pub trait KeyResolver {
    /// Resolves the key for `holding` against `table`.
    fn resolve<'a>(&self, table: &'a ClassificationTable, holding: &'a Holding)
        -> Option<Cow<'a, str>>;
}

impl<R: KeyResolver + ?Sized> KeyResolver for &R {
    fn resolve<'a>(
        &self,
        table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        (**self).resolve(table, holding)
    }
}

impl<R: KeyResolver + ?Sized> KeyResolver for Box<R> {
    fn resolve<'a>(
        &self,
        table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        (**self).resolve(table, holding)
    }
}

/// Resolves to the first table key that is a prefix of the holding's account.
///
/// Keys are tried in table order and the first hit wins, even when a later
/// key would match more of the account. With `"Assets"` listed before
/// `"Assets:Cash"`, the account `Assets:Cash:USD` resolves to `"Assets"`.
/// Empty keys never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixKeyResolver;

impl KeyResolver for PrefixKeyResolver {
    fn resolve<'a>(
        &self,
        table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        table
            .keys()
            .find(|key| !key.is_empty() && holding.account.starts_with(key))
            .map(Cow::Borrowed)
    }
}

/// Resolves to the longest table key that is a prefix of the holding's account.
///
/// Among equally long matches the one listed first wins. Empty keys never
/// match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestPrefixResolver;

impl KeyResolver for LongestPrefixResolver {
    fn resolve<'a>(
        &self,
        table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        table
            .keys()
            .filter(|key| !key.is_empty() && holding.account.starts_with(key))
            .fold(None::<&str>, |best, key| match best {
                Some(b) if b.len() >= key.len() => Some(b),
                _ => Some(key),
            })
            .map(Cow::Borrowed)
    }
}

/// A holding attribute usable as a classification key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingField {
    /// The account identifier.
    #[default]
    Account,
    /// The commodity of the units.
    Currency,
    /// The cost currency.
    CostCurrency,
}

impl HoldingField {
    /// Returns the attribute's value for a holding, if set.
    #[must_use]
    pub fn extract(self, holding: &Holding) -> Option<&str> {
        match self {
            Self::Account => Some(holding.account.as_str()),
            Self::Currency => Some(holding.currency.as_str()).filter(|c| !c.is_empty()),
            Self::CostCurrency => holding.cost_currency.as_deref(),
        }
    }
}

/// Uses a holding attribute verbatim as the classification key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactKeyResolver {
    /// The attribute to read.
    pub field: HoldingField,
}

impl ExactKeyResolver {
    /// Creates a resolver reading the given attribute.
    #[must_use]
    pub fn new(field: HoldingField) -> Self {
        Self { field }
    }
}

impl KeyResolver for ExactKeyResolver {
    fn resolve<'a>(
        &self,
        _table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        self.field.extract(holding).map(Cow::Borrowed)
    }
}

/// Adapts a closure into a [`KeyResolver`].
///
/// # Example
///
/// ```
/// use allot_core::join::{FnResolver, KeyResolver};
/// use allot_core::types::{ClassificationTable, Holding};
///
/// // Classify by the second component of the account name
/// let by_institution = FnResolver::new(|_table: &ClassificationTable, h: &Holding| {
///     h.account.split(':').nth(1).map(str::to_string)
/// });
///
/// let holding = Holding::builder().account("Assets:Vanguard:VTI").build()?;
/// let table = ClassificationTable::new();
/// let key = by_institution.resolve(&table, &holding);
/// assert_eq!(key.as_deref(), Some("Vanguard"));
/// # Ok::<(), allot_core::AllotError>(())
/// ```
#[derive(Clone)]
pub struct FnResolver<F> {
    f: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&ClassificationTable, &Holding) -> Option<String>,
{
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

impl<F> KeyResolver for FnResolver<F>
where
    F: Fn(&ClassificationTable, &Holding) -> Option<String>,
{
    fn resolve<'a>(
        &self,
        table: &'a ClassificationTable,
        holding: &'a Holding,
    ) -> Option<Cow<'a, str>> {
        (self.f)(table, holding).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureVector;

    fn holding(account: &str) -> Holding {
        Holding::builder()
            .account(account)
            .currency("USD")
            .build()
            .unwrap()
    }

    fn table(keys: &[&str]) -> ClassificationTable {
        let mut table = ClassificationTable::new();
        for key in keys {
            table.insert(*key, FeatureVector::single("X")).unwrap();
        }
        table
    }

    #[test]
    fn test_prefix_match() {
        let t = table(&["Assets:Bond", "Assets:Stock"]);
        let h = holding("Assets:Stock:AAPL");
        let key = PrefixKeyResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets:Stock"));
    }

    #[test]
    fn test_prefix_first_match_wins() {
        let t = table(&["Assets", "Assets:Cash"]);
        let h = holding("Assets:Cash:USD");
        let key = PrefixKeyResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets"));

        // Reversing the table order changes the answer
        let t = table(&["Assets:Cash", "Assets"]);
        let h = holding("Assets:Cash:USD");
        let key = PrefixKeyResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets:Cash"));
    }

    #[test]
    fn test_prefix_is_not_component_aware() {
        let t = table(&["Assets:Bro"]);
        let h = holding("Assets:Broker");
        let key = PrefixKeyResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets:Bro"));
    }

    #[test]
    fn test_prefix_empty_key_never_matches() {
        let t = table(&["", "Liabilities"]);
        assert!(PrefixKeyResolver.resolve(&t, &holding("Assets:Cash")).is_none());
        assert!(LongestPrefixResolver
            .resolve(&t, &holding("Assets:Cash"))
            .is_none());
    }

    #[test]
    fn test_prefix_no_match() {
        let t = table(&["Assets:Stock"]);
        assert!(PrefixKeyResolver.resolve(&t, &holding("Assets:St")).is_none());
        assert!(PrefixKeyResolver
            .resolve(&ClassificationTable::new(), &holding("X"))
            .is_none());
    }

    #[test]
    fn test_longest_prefix() {
        let t = table(&["Assets", "Assets:Cash", "Assets:Ca"]);
        let h = holding("Assets:Cash:USD");
        let key = LongestPrefixResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets:Cash"));

        let h = holding("Assets:Bank");
        let key = LongestPrefixResolver.resolve(&t, &h);
        assert_eq!(key.as_deref(), Some("Assets"));
    }

    #[test]
    fn test_exact_resolver() {
        let h = Holding::builder()
            .account("Assets:Broker:VEA")
            .currency("VEA")
            .cost_currency("USD")
            .build()
            .unwrap();
        let t = ClassificationTable::new();

        let by_currency = ExactKeyResolver::new(HoldingField::Currency);
        assert_eq!(by_currency.resolve(&t, &h).as_deref(), Some("VEA"));

        let by_cost = ExactKeyResolver::new(HoldingField::CostCurrency);
        assert_eq!(by_cost.resolve(&t, &h).as_deref(), Some("USD"));

        let by_account = ExactKeyResolver::default();
        assert_eq!(by_account.resolve(&t, &h).as_deref(), Some("Assets:Broker:VEA"));

        let bare = Holding::builder().account("Assets:Misc").build().unwrap();
        assert!(by_cost.resolve(&t, &bare).is_none());
        assert!(by_currency.resolve(&t, &bare).is_none());
    }

    #[test]
    fn test_fn_resolver() {
        let t = table(&["Assets:Stock"]);
        let upper = FnResolver::new(|_t: &ClassificationTable, h: &Holding| {
            Some(h.account.to_uppercase())
        });
        assert_eq!(
            upper.resolve(&t, &holding("assets:x")).as_deref(),
            Some("ASSETS:X")
        );
    }

    #[test]
    fn test_boxed_resolver() {
        let t = table(&["Assets"]);
        let boxed: Box<dyn KeyResolver> = Box::new(PrefixKeyResolver);
        assert_eq!(
            boxed.resolve(&t, &holding("Assets:Cash")).as_deref(),
            Some("Assets")
        );
    }

    #[test]
    fn test_holding_field_serde() {
        let field: HoldingField = serde_json::from_str("\"cost_currency\"").unwrap();
        assert_eq!(field, HoldingField::CostCurrency);
    }
}
