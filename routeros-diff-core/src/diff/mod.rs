//! Edit-script computation between two section trees.
//!
//! Each section is processed in a fixed order (settings, deletions,
//! insertions, repositioning) and every command is applied to the working
//! copy before the next one is computed, so the indices in the script are
//! valid at the moment each command runs.

mod engine;

use crate::error::IntegrityError;
use crate::script::Script;
use crate::tree::SectionTree;

/// Edit `local` in place until it matches `target`, returning the commands
/// that were applied.
///
/// Only sections present in `target` are visited; missing ones are created
/// empty in `local` first.
pub fn merge(local: &mut SectionTree, target: &SectionTree) -> Result<Script, IntegrityError> {
    let root = engine::merge_section(local, SectionTree::ROOT, target, SectionTree::ROOT)?;
    Ok(Script::from_root(root))
}

/// Script transforming `base` into `target`. `base` is left untouched.
pub fn diff(base: &SectionTree, target: &SectionTree) -> Result<Script, IntegrityError> {
    let mut local = base.clone();
    merge(&mut local, target)
}
