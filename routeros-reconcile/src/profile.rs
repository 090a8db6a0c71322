use std::fs;
use std::path::Path;

use routeros_diff_core::{OrderRule, OrderRuleError, OrderTable};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    section: Vec<OrderRule>,
}

/// Errors returned when loading an order profile.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid rule in profile {path}: {source}")]
    Rule {
        path: String,
        source: OrderRuleError,
    },
}

/// Load an order profile from a TOML file. Its rules take precedence over
/// the built-in ones.
pub fn load_profile(path: &Path) -> Result<OrderTable, ProfileLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_profile(&raw, path.display().to_string())
}

/// Order table from the embedded default profile, or the built-in rules alone
/// if the embedded profile is unusable.
pub fn default_profile() -> OrderTable {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/profiles/default.toml"));
    parse_profile(embedded, "embedded profile".to_string()).unwrap_or_else(|_| OrderTable::builtin())
}

fn parse_profile(raw: &str, path: String) -> Result<OrderTable, ProfileLoadError> {
    let parsed: ProfileFile = toml::from_str(raw).map_err(|source| ProfileLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    OrderTable::builtin()
        .with_overrides(parsed.section)
        .map_err(|source| ProfileLoadError::Rule { path, source })
}
