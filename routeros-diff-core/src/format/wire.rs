//! Device-ready lines.
//!
//! RouterOS renumbers items after every structural edit, and a numeric id is
//! only resolved against the numbering from the last `print` in that menu.
//! Before any index-dependent command that follows an index-shifting one, a
//! `print` is emitted so the device re-settles its numbering.

use crate::command::Command;
use crate::path::SectionPath;
use crate::script::ScriptSection;

pub(super) fn section_lines(section: &ScriptSection) -> Vec<String> {
    let path = section.path();
    let mut lines = Vec::with_capacity(section.commands().len());
    let mut stale = false;

    for command in section.commands() {
        if stale && command.requires_fresh_indices() {
            lines.push(refresh_line(path));
            stale = false;
        }
        lines.push(command_line(path, command));
        if command.invalidates_indices() {
            stale = true;
        }
    }
    lines
}

/// `<path> <command>`, or `/<command>` at the root.
pub fn command_line(path: &SectionPath, command: &Command) -> String {
    prefixed(path, &command.to_string())
}

/// The refresh directive for `path`.
pub fn refresh_line(path: &SectionPath) -> String {
    prefixed(path, "print")
}

fn prefixed(path: &SectionPath, text: &str) -> String {
    if path.is_root() {
        format!("/{text}")
    } else {
        format!("{path} {text}")
    }
}
