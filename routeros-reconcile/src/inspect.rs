use routeros_diff_core::{OrderMode, Section, SectionPath, SectionTree};
use serde::Serialize;

/// One row of the section listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
    pub path: String,
    pub mode: OrderMode,
    pub items: usize,
    pub settings: usize,
    #[serde(skip)]
    name: String,
    #[serde(skip)]
    depth: usize,
}

impl SectionRow {
    fn from_section(section: &Section) -> Self {
        Self {
            path: section.path().to_string(),
            mode: section.mode(),
            items: section.items().len(),
            settings: section.settings().count(),
            name: section.path().name().unwrap_or("/").to_string(),
            depth: section.path().segments().len(),
        }
    }
}

/// List `tree`'s sections in document order, restricted to `under` and its
/// descendants when given. Returns `None` when `under` does not exist.
pub fn section_rows(tree: &SectionTree, under: Option<&SectionPath>) -> Option<Vec<SectionRow>> {
    let prefix: &[String] = match under {
        Some(path) => {
            tree.find(path)?;
            path.segments()
        }
        None => &[],
    };
    Some(
        tree.sections()
            .filter(|section| section.path().segments().starts_with(prefix))
            .map(SectionRow::from_section)
            .collect(),
    )
}

/// Render rows as an indented tree, one section per line.
pub fn render_rows(rows: &[SectionRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "  ".repeat(row.depth);
        out.push_str(&format!(
            "{indent}{} [{}] items={} settings={}\n",
            row.name, row.mode, row.items, row.settings
        ));
    }
    out
}
