use crate::error::IntegrityError;
use crate::script::Script;
use crate::tree::SectionTree;

/// Replay `script` on a copy of `tree` and return the result.
pub fn apply(tree: &SectionTree, script: &Script) -> Result<SectionTree, IntegrityError> {
    let mut result = tree.clone();
    apply_in_place(&mut result, script)?;
    Ok(result)
}

/// Replay `script` on `tree`, section by section in script order.
///
/// Stops at the first command that cannot be applied; commands before it
/// stay applied.
pub fn apply_in_place(tree: &mut SectionTree, script: &Script) -> Result<(), IntegrityError> {
    for section in script.sections() {
        if section.commands().is_empty() {
            continue;
        }
        let id = tree.ensure(section.path());
        for command in section.commands() {
            tree.section_mut(id).load_command(command.clone())?;
        }
    }
    Ok(())
}
