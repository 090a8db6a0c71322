use serde::Serialize;

use crate::command::Command;
use crate::order::OrderMode;
use crate::path::SectionPath;
use crate::script::Script;

#[derive(Serialize)]
struct SectionEntry<'a> {
    path: &'a SectionPath,
    mode: OrderMode,
    commands: &'a [Command],
}

/// Format the non-empty sections of a script as a JSON array.
pub fn format_json(script: &Script) -> String {
    let entries: Vec<SectionEntry<'_>> = script
        .sections()
        .filter(|section| !section.commands().is_empty())
        .map(|section| SectionEntry {
            path: section.path(),
            mode: section.mode(),
            commands: section.commands(),
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}
