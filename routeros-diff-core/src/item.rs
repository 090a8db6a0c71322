use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::lexer;

/// Key/value mapping of one item or setting. Keys iterate sorted, which keeps
/// every rendered line deterministic.
pub type Values = BTreeMap<String, String>;

/// Render values as `k1=v1 k2=v2 ...`, sorted by key, quoting where needed.
pub fn format_values(values: &Values) -> String {
    values
        .iter()
        .map(|(key, value)| format!("{key}={}", lexer::quote(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One list entry of a section, such as a single firewall rule.
///
/// Items compare by their whole mapping; key order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Item {
    values: Values,
}

impl Item {
    pub fn new(values: Values) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Item {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(&self.values))
    }
}

/// Target of a `set` command.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Identifier {
    /// The section itself (`set key=value` with no identifier).
    Section,
    /// An ephemeral numeric position.
    Numeric(usize),
    /// A named entry, e.g. `ether1`.
    Name(String),
    /// A `[ find ... ]` locator, kept verbatim and never resolved.
    Dynamic(String),
}

impl Identifier {
    /// Classify a bare identifier word as numeric or named.
    pub fn from_word(word: &str) -> Self {
        match word.parse::<usize>() {
            Ok(index) if word.bytes().all(|b| b.is_ascii_digit()) => Self::Numeric(index),
            _ => Self::Name(word.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => Ok(()),
            Self::Numeric(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(&lexer::quote(name)),
            Self::Dynamic(locator) => f.write_str(locator),
        }
    }
}

/// Values assigned to one identifier of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    identifier: Identifier,
    values: Values,
}

impl Setting {
    pub fn new(identifier: Identifier, values: Values) -> Self {
        Self { identifier, values }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut Values {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_compare_by_mapping() {
        let a: Item = [("chain", "input"), ("action", "drop")].into_iter().collect();
        let b: Item = [("action", "drop"), ("chain", "input")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "action=drop chain=input");
    }

    #[test]
    fn identifier_classifies_words() {
        assert_eq!(Identifier::from_word("12"), Identifier::Numeric(12));
        assert_eq!(Identifier::from_word("ether1"), Identifier::Name("ether1".into()));
        assert_eq!(Identifier::from_word("+3"), Identifier::Name("+3".into()));
        assert_eq!(Identifier::Section.to_string(), "");
    }
}
