use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::command::Command;
use crate::tree::SectionTree;

/// Errors that can occur while writing export text.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write output file.
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a tree as export text that [`parse`](crate::parse) reads back
/// to an equal tree.
///
/// Each section with content gets a `/path` header, its items as `add`
/// lines in order, then its settings as `set` lines.
pub fn export(tree: &SectionTree) -> String {
    let mut out = String::new();
    if let Some(version) = tree.version() {
        let _ = writeln!(out, "# by RouterOS {version}");
    }
    for section in tree.sections().filter(|section| section.has_content()) {
        let _ = writeln!(out, "{}", section.path());
        for item in section.items() {
            let _ = writeln!(out, "add {item}");
        }
        for setting in section.settings() {
            let command = Command::Set {
                identifier: setting.identifier().clone(),
                values: setting.values().clone(),
            };
            let _ = writeln!(out, "{command}");
        }
    }
    out
}

/// Serialize a tree and write it to `path`.
pub fn write_file(tree: &SectionTree, path: &Path) -> Result<(), WriteError> {
    fs::write(path, export(tree))?;
    Ok(())
}
