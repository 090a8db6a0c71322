use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::command::Command;
use crate::format::{render, RenderMode};
use crate::order::{OrderMode, OrderTable};
use crate::path::SectionPath;

/// Commands for one section, followed by the scripts of its child sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptSection {
    path: SectionPath,
    mode: OrderMode,
    commands: Vec<Command>,
    children: Vec<ScriptSection>,
}

impl ScriptSection {
    pub fn new(path: SectionPath, mode: OrderMode) -> Self {
        Self {
            path,
            mode,
            commands: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &SectionPath {
        &self.path
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn children(&self) -> &[ScriptSection] {
        &self.children
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn push_child(&mut self, child: ScriptSection) {
        self.children.push(child);
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a ScriptSection>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }

    fn child_mut(&mut self, name: &str, order: &OrderTable) -> &mut ScriptSection {
        let position = self
            .children
            .iter()
            .position(|child| child.path.name() == Some(name));
        let index = match position {
            Some(index) => index,
            None => {
                let path = self.path.child(name);
                let mode = order.mode_for(&path);
                self.children.push(ScriptSection::new(path, mode));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}

/// An edit script: commands grouped by section, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    root: ScriptSection,
}

impl Script {
    pub fn new() -> Self {
        Self::from_root(ScriptSection::new(SectionPath::root(), OrderMode::default()))
    }

    pub fn from_root(root: ScriptSection) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ScriptSection {
        &self.root
    }

    /// True when no section carries a command.
    pub fn is_empty(&self) -> bool {
        self.sections().all(|section| section.commands.is_empty())
    }

    /// Total number of commands across all sections.
    pub fn len(&self) -> usize {
        self.sections().map(|section| section.commands.len()).sum()
    }

    /// Sections in execution order: each section before its children.
    pub fn sections(&self) -> impl Iterator<Item = &ScriptSection> + '_ {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out.into_iter()
    }

    pub fn section(&self, path: &SectionPath) -> Option<&ScriptSection> {
        self.sections().find(|section| section.path == *path)
    }

    /// Return the section at `path`, creating it and its ancestors with modes
    /// from `order`.
    pub fn section_mut(&mut self, path: &SectionPath, order: &OrderTable) -> &mut ScriptSection {
        path.segments()
            .iter()
            .fold(&mut self.root, |section, name| section.child_mut(name, order))
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Script {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in render(self, RenderMode::Pretty) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_mut_builds_nested_sections() {
        let order = OrderTable::builtin();
        let mut script = Script::new();
        assert!(script.is_empty());

        script
            .section_mut(&SectionPath::parse("/ip firewall filter"), &order)
            .push(Command::Remove { index: 0 });
        script
            .section_mut(&SectionPath::parse("/ip firewall filter"), &order)
            .push(Command::Remove { index: 1 });

        assert_eq!(script.len(), 2);
        assert_eq!(script.sections().count(), 4);
        let filter = script
            .section(&SectionPath::parse("/ip firewall filter"))
            .expect("section exists");
        assert_eq!(filter.mode(), OrderMode::Ordered);
        assert_eq!(filter.commands().len(), 2);
    }
}
