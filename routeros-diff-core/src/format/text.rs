use crate::command::Command;
use crate::script::{Script, ScriptSection};

use super::{render, RenderMode};

pub(super) fn section_lines(section: &ScriptSection, separated: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(section.commands().len() + 2);
    if separated {
        lines.push(String::new());
    }
    lines.push(section.path().to_string());
    lines.extend(section.commands().iter().map(ToString::to_string));
    lines
}

/// Format a script in pretty form as one string.
pub fn format_text(script: &Script) -> String {
    render(script, RenderMode::Pretty)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a one-line count of sections and commands by kind.
pub fn format_summary(script: &Script) -> String {
    let mut sections = 0;
    let mut add = 0;
    let mut remove = 0;
    let mut moves = 0;
    let mut set = 0;

    for section in script.sections() {
        if !section.commands().is_empty() {
            sections += 1;
        }
        for command in section.commands() {
            match command {
                Command::Add { .. } => add += 1,
                Command::Remove { .. } => remove += 1,
                Command::Move { .. } => moves += 1,
                Command::Set { .. } => set += 1,
            }
        }
    }

    format!("sections={sections} add={add} remove={remove} move={moves} set={set}")
}
