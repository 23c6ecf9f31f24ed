//! Rules file parsing.
//!
//! A rules file is TOML with one `[[section]]` per breakdown. Rules inside
//! a section are tried in file order.
//!
//! ```toml
//! [config]
//! parallel_threshold = 500
//!
//! [[section]]
//! title = "Asset class"
//!
//! [[section.rule]]
//! key = "Assets:Vanguard:VBAL"
//! weights = { "US Equity" = 24, "Intl Equity" = 36, "Bond" = 40 }
//!
//! [[section.rule]]
//! key = "Assets:Bank"
//! weights = { Cash = 1 }
//!
//! [[section]]
//! title = "By commodity"
//! resolver = "exact"
//! field = "currency"
//! ```

use std::path::Path;

use allot_core::{
    AllotConfig, ClassificationTable, ExactKeyResolver, HoldingField, KeyResolver,
    LongestPrefixResolver, PrefixKeyResolver, TableEntry,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// Parsed rules file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Aggregation settings.
    #[serde(default)]
    pub config: AllotConfig,

    /// Sections in file order.
    #[serde(default)]
    pub section: Vec<SectionConfig>,
}

/// How a section picks the rule for a holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolverKind {
    /// First rule whose key prefixes the account.
    #[default]
    Prefix,
    /// Longest rule key that prefixes the account.
    LongestPrefix,
    /// A holding field matched verbatim against rule keys.
    Exact,
}

/// One breakdown.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Heading shown above the breakdown.
    pub title: String,

    /// Key resolution strategy.
    #[serde(default)]
    pub resolver: ResolverKind,

    /// Holding field read by the `exact` resolver.
    #[serde(default)]
    pub field: Option<HoldingField>,

    /// Ordered rules.
    #[serde(default)]
    pub rule: Vec<TableEntry>,
}

impl SectionConfig {
    /// Builds the section's classification table.
    pub fn table(&self) -> CliResult<ClassificationTable> {
        ClassificationTable::try_from(self.rule.clone())
            .map_err(|e| CliError::Rules(format!("section '{}': {e}", self.title)))
    }

    /// Builds the section's key resolver.
    pub fn resolver(&self) -> Box<dyn KeyResolver + Sync> {
        match self.resolver {
            ResolverKind::Prefix => Box::new(PrefixKeyResolver),
            ResolverKind::LongestPrefix => Box::new(LongestPrefixResolver),
            ResolverKind::Exact => Box::new(ExactKeyResolver::new(self.field.unwrap_or_default())),
        }
    }
}

/// Loads and validates a rules file.
pub fn load_rules(path: impl AsRef<Path>) -> CliResult<RulesFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let rules = parse_rules(&content)?;
    debug!(
        "loaded {} sections from {}",
        rules.section.len(),
        path.display()
    );
    Ok(rules)
}

/// Parses rules from TOML text.
pub fn parse_rules(content: &str) -> CliResult<RulesFile> {
    let rules: RulesFile = toml::from_str(content).map_err(|e| CliError::Rules(e.to_string()))?;

    if rules.section.is_empty() {
        return Err(CliError::Rules("no [[section]] defined".to_string()));
    }
    for section in &rules.section {
        if section.field.is_some() && section.resolver != ResolverKind::Exact {
            warn!(
                "section '{}': `field` is only used by the exact resolver",
                section.title
            );
        }
        // Surface duplicate keys and negative weights before any holding is read
        section.table()?;
    }
    Ok(rules)
}
