//! Script renderers.

pub mod json;
pub mod text;
pub mod wire;

use crate::script::Script;

pub use json::format_json;
pub use text::{format_summary, format_text};

/// Output flavour for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Section headers followed by bare commands, for reading.
    Pretty,
    /// Fully path-prefixed lines with refresh directives, for a device.
    Wire,
}

/// Lines of `script` in `mode`. Sections without commands produce nothing.
///
/// The iterator borrows the script and can be recreated at will.
pub fn render(script: &Script, mode: RenderMode) -> impl Iterator<Item = String> + '_ {
    script
        .sections()
        .filter(|section| !section.commands().is_empty())
        .enumerate()
        .flat_map(move |(n, section)| match mode {
            RenderMode::Pretty => text::section_lines(section, n > 0),
            RenderMode::Wire => wire::section_lines(section),
        })
}
