//! Arena-backed hierarchy of configuration sections.

mod section;

use std::collections::BTreeMap;

use crate::item::{Identifier, Item, Setting};
use crate::order::OrderTable;
use crate::path::SectionPath;

pub use section::Section;

/// Index of a section inside its [`SectionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(usize);

/// Parsed configuration: every section reachable from `/`, plus the order
/// table used to give new sections their [`OrderMode`](crate::OrderMode).
///
/// Ids are only meaningful for the tree that issued them; a cloned tree keeps
/// the same ids.
#[derive(Debug, Clone)]
pub struct SectionTree {
    sections: Vec<Section>,
    order: OrderTable,
    version: Option<String>,
}

impl SectionTree {
    pub const ROOT: SectionId = SectionId(0);

    /// Empty tree using the built-in order table.
    pub fn new() -> Self {
        Self::with_order_table(OrderTable::builtin())
    }

    pub fn with_order_table(order: OrderTable) -> Self {
        let root = SectionPath::root();
        let mode = order.mode_for(&root);
        Self {
            sections: vec![Section::new(root, mode, None)],
            order,
            version: None,
        }
    }

    pub fn order_table(&self) -> &OrderTable {
        &self.order
    }

    /// RouterOS version read from the export header, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    pub fn root(&self) -> &Section {
        self.section(Self::ROOT)
    }

    pub fn get(&self, path: &SectionPath) -> Option<&Section> {
        self.find(path).map(|id| self.section(id))
    }

    pub fn find(&self, path: &SectionPath) -> Option<SectionId> {
        path.segments()
            .iter()
            .try_fold(Self::ROOT, |id, name| self.child(id, name))
    }

    pub fn child(&self, id: SectionId, name: &str) -> Option<SectionId> {
        self.section(id)
            .children
            .iter()
            .copied()
            .find(|&child| self.section(child).path().name() == Some(name))
    }

    /// Child ids of `id`, in creation order.
    pub fn children(&self, id: SectionId) -> impl Iterator<Item = SectionId> + '_ {
        self.section(id).children.iter().copied()
    }

    /// Return the child called `name`, creating it if needed.
    pub fn ensure_child(&mut self, id: SectionId, name: &str) -> SectionId {
        if let Some(child) = self.child(id, name) {
            return child;
        }
        let path = self.section(id).path().child(name);
        let mode = self.order.mode_for(&path);
        let child = SectionId(self.sections.len());
        self.sections.push(Section::new(path, mode, Some(id)));
        self.section_mut(id).children.push(child);
        child
    }

    /// Return the section at `path`, creating it and any missing ancestors.
    pub fn ensure(&mut self, path: &SectionPath) -> SectionId {
        path.segments()
            .iter()
            .fold(Self::ROOT, |id, name| self.ensure_child(id, name))
    }

    /// Section ids in document order: parents before children, siblings in
    /// creation order.
    pub fn traverse(&self) -> Vec<SectionId> {
        let mut order = Vec::with_capacity(self.sections.len());
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.section(id).children.iter().rev().copied());
        }
        order
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.traverse().into_iter().map(move |id| self.section(id))
    }

    fn content(&self) -> BTreeMap<&SectionPath, (Vec<&Item>, &BTreeMap<Identifier, Setting>)> {
        self.sections
            .iter()
            .filter(|section| section.has_content())
            .map(|section| {
                let mut items: Vec<&Item> = section.items().iter().collect();
                if !section.mode().is_ordered() {
                    items.sort();
                }
                (section.path(), (items, section.settings_map()))
            })
            .collect()
    }
}

impl Default for SectionTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality over sections holding items or settings. Item order
/// only counts in ordered sections. Empty sections, order modes and command
/// logs are ignored.
///
/// This is stricter than [`check_convergence`](crate::check_convergence):
/// sections and setting keys present on one side only make trees unequal,
/// while a diff never visits or clears them.
impl PartialEq for SectionTree {
    fn eq(&self, other: &Self) -> bool {
        self.content() == other.content()
    }
}

impl Eq for SectionTree {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderMode;

    #[test]
    fn ensure_creates_ancestors_with_modes() {
        let mut tree = SectionTree::new();
        let filter = tree.ensure(&SectionPath::parse("/ip firewall filter"));
        assert_eq!(tree.section(filter).mode(), OrderMode::Ordered);

        let firewall = tree.find(&SectionPath::parse("/ip firewall")).expect("ancestor exists");
        assert_eq!(tree.section(firewall).mode(), OrderMode::Unordered);
        assert_eq!(tree.section(filter).parent(), Some(firewall));
        assert_eq!(tree.ensure(&SectionPath::parse("/ip firewall filter")), filter);
    }

    #[test]
    fn traverse_is_pre_order_in_creation_order() {
        let mut tree = SectionTree::new();
        for path in ["/ip firewall filter", "/interface bridge", "/ip address"] {
            tree.ensure(&SectionPath::parse(path));
        }
        let paths: Vec<String> = tree.sections().map(|s| s.path().to_string()).collect();
        assert_eq!(
            paths,
            [
                "/",
                "/ip",
                "/ip firewall",
                "/ip firewall filter",
                "/ip address",
                "/interface",
                "/interface bridge",
            ]
        );
    }

    #[test]
    fn equality_ignores_empty_sections() {
        let mut a = SectionTree::new();
        let mut b = SectionTree::new();
        a.ensure(&SectionPath::parse("/system clock"));
        assert_eq!(a, b);

        let id = b.ensure(&SectionPath::parse("/ip address"));
        b.section_mut(id)
            .insert_item([("address", "10.0.0.1/24")].into_iter().collect(), None)
            .expect("insert");
        assert_ne!(a, b);
    }

    #[test]
    fn equality_ignores_order_of_unordered_items() {
        let build = |path: &str, comments: &[&str]| {
            let mut tree = SectionTree::new();
            let id = tree.ensure(&SectionPath::parse(path));
            for comment in comments {
                tree.section_mut(id)
                    .insert_item([("comment", *comment)].into_iter().collect(), None)
                    .expect("insert");
            }
            tree
        };
        assert_eq!(build("/ip address", &["a", "b"]), build("/ip address", &["b", "a"]));
        assert_ne!(
            build("/ip firewall filter", &["a", "b"]),
            build("/ip firewall filter", &["b", "a"])
        );
    }
}
