//! Per-section ordering policy, resolved from the section path.

use std::fmt::{self, Display, Formatter};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::SectionPath;

/// Whether item position is meaningful in a section, and which positional
/// commands are legal there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// Order is incidental. No `move`, inserts always append.
    #[default]
    Unordered,
    /// `place-before` on `add` and `move` are both legal.
    Ordered,
    /// Inserts always append, but `move` may reorder afterwards.
    OrderedAppend,
}

impl OrderMode {
    /// True when `move` is legal and the diff repositions items.
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Unordered)
    }

    /// True when `add` may carry a `place-before` destination.
    pub fn allows_positional_insert(self) -> bool {
        matches!(self, Self::Ordered)
    }
}

impl Display for OrderMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unordered => "unordered",
            Self::Ordered => "ordered",
            Self::OrderedAppend => "ordered-append",
        })
    }
}

/// One rule of an order table: a regex matched against the whole rendered
/// path (e.g. `/ip firewall filter`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRule {
    pub pattern: String,
    pub mode: OrderMode,
}

impl OrderRule {
    pub fn new(pattern: impl Into<String>, mode: OrderMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderRuleError {
    #[error("invalid section pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

const BUILTIN_RULES: &[(&str, OrderMode)] = &[
    (r"/ip(v6)? firewall (filter|nat|mangle|raw)", OrderMode::Ordered),
    (r"/interface bridge (filter|nat)", OrderMode::Ordered),
    (r"/queue simple", OrderMode::Ordered),
];

/// Ordered lookup table from path patterns to [`OrderMode`]; the first
/// matching rule wins and unmatched paths are [`OrderMode::Unordered`].
#[derive(Debug, Clone)]
pub struct OrderTable {
    rules: Vec<(Regex, OrderMode)>,
}

impl OrderTable {
    /// Table with the firewall, bridge filter and simple queue sections ordered.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(pattern, mode)| OrderRule::new(*pattern, *mode));
        Self::from_rules(rules).expect("built-in order patterns compile")
    }

    /// Compile rules into a table. Patterns are anchored at both ends.
    pub fn from_rules<I>(rules: I) -> Result<Self, OrderRuleError>
    where
        I: IntoIterator<Item = OrderRule>,
    {
        let rules = rules
            .into_iter()
            .map(|rule| {
                Regex::new(&format!("^(?:{})$", rule.pattern))
                    .map(|re| (re, rule.mode))
                    .map_err(|source| OrderRuleError::InvalidPattern {
                        pattern: rule.pattern,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Put `rules` ahead of this table's rules so they take precedence.
    pub fn with_overrides<I>(self, rules: I) -> Result<Self, OrderRuleError>
    where
        I: IntoIterator<Item = OrderRule>,
    {
        let mut table = Self::from_rules(rules)?;
        table.rules.extend(self.rules);
        Ok(table)
    }

    pub fn mode_for(&self, path: &SectionPath) -> OrderMode {
        let rendered = path.to_string();
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(&rendered))
            .map(|(_, mode)| *mode)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for OrderTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(table: &OrderTable, path: &str) -> OrderMode {
        table.mode_for(&SectionPath::parse(path))
    }

    #[test]
    fn builtin_marks_firewall_tables_ordered() {
        let table = OrderTable::builtin();
        assert_eq!(mode(&table, "/ip firewall filter"), OrderMode::Ordered);
        assert_eq!(mode(&table, "/ipv6 firewall mangle"), OrderMode::Ordered);
        assert_eq!(mode(&table, "/queue simple"), OrderMode::Ordered);
        assert_eq!(mode(&table, "/ip firewall"), OrderMode::Unordered);
        assert_eq!(mode(&table, "/ip firewall filter extra"), OrderMode::Unordered);
        assert_eq!(mode(&table, "/"), OrderMode::Unordered);
    }

    #[test]
    fn overrides_take_precedence() {
        let table = OrderTable::builtin()
            .with_overrides([
                OrderRule::new("/ip firewall filter", OrderMode::OrderedAppend),
                OrderRule::new("/routing filter rule", OrderMode::Ordered),
            ])
            .expect("patterns compile");
        assert_eq!(mode(&table, "/ip firewall filter"), OrderMode::OrderedAppend);
        assert_eq!(mode(&table, "/ip firewall nat"), OrderMode::Ordered);
        assert_eq!(mode(&table, "/routing filter rule"), OrderMode::Ordered);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = OrderTable::from_rules([OrderRule::new("/ip (", OrderMode::Ordered)])
            .expect_err("pattern should not compile");
        assert!(err.to_string().contains("/ip ("));
    }

    #[test]
    fn mode_capabilities() {
        assert!(!OrderMode::Unordered.is_ordered());
        assert!(OrderMode::OrderedAppend.is_ordered());
        assert!(!OrderMode::OrderedAppend.allows_positional_insert());
        assert!(OrderMode::Ordered.allows_positional_insert());
        assert_eq!(OrderMode::OrderedAppend.to_string(), "ordered-append");
    }
}
