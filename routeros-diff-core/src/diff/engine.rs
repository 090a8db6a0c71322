use log::{debug, trace};

use crate::command::Command;
use crate::error::IntegrityError;
use crate::item::Item;
use crate::script::ScriptSection;
use crate::tree::{Section, SectionId, SectionTree};

pub(super) fn merge_section(
    local: &mut SectionTree,
    local_id: SectionId,
    target: &SectionTree,
    target_id: SectionId,
) -> Result<ScriptSection, IntegrityError> {
    let wanted = target.section(target_id);
    let section = local.section_mut(local_id);
    let mut script = ScriptSection::new(section.path().clone(), section.mode());

    merge_settings(section, wanted, &mut script);
    let removed = merge_deletions(section, wanted, &mut script)?;
    let added = merge_insertions(section, wanted, &mut script)?;
    let moved = if section.mode().is_ordered() {
        reposition(section, wanted.items(), &mut script)?
    } else {
        0
    };
    debug!(
        "{}: {} command(s), removed={removed} added={added} moved={moved}",
        section.path(),
        script.commands().len()
    );

    for child_id in target.children(target_id) {
        let Some(name) = target.section(child_id).path().name() else {
            continue;
        };
        let local_child = local.ensure_child(local_id, name);
        script.push_child(merge_section(local, local_child, target, child_id)?);
    }
    Ok(script)
}

fn emit(script: &mut ScriptSection, command: Command) {
    trace!("{} {command}", script.path());
    script.push(command);
}

fn merge_settings(section: &mut Section, wanted: &Section, script: &mut ScriptSection) {
    for setting in wanted.settings() {
        if let Some(command) = section.set_settings(setting.clone()) {
            emit(script, command);
        }
    }
}

fn merge_deletions(
    section: &mut Section,
    wanted: &Section,
    script: &mut ScriptSection,
) -> Result<usize, IntegrityError> {
    let stale: Vec<Item> = section
        .items()
        .iter()
        .filter(|item| wanted.position(item).is_none())
        .cloned()
        .collect();
    for item in &stale {
        let command = section.delete_item(item)?;
        emit(script, command);
    }
    Ok(stale.len())
}

fn merge_insertions(
    section: &mut Section,
    wanted: &Section,
    script: &mut ScriptSection,
) -> Result<usize, IntegrityError> {
    let mut added = 0;
    for (position, item) in wanted.items().iter().enumerate() {
        if section.position(item).is_some() {
            continue;
        }
        let destination = (section.mode().allows_positional_insert()
            && position < section.items().len())
        .then_some(position);
        let command = section.insert_item(item.clone(), destination)?;
        emit(script, command);
        added += 1;
    }
    Ok(added)
}

/// Left-to-right scan bringing `section` into the order of `wanted`.
///
/// At the first mismatch `i`, the wanted item sits somewhere after `i` and is
/// moved to just before the current `items[i]`. Each move settles one
/// position, so the scan emits at most one move per item.
fn reposition(
    section: &mut Section,
    wanted: &[Item],
    script: &mut ScriptSection,
) -> Result<usize, IntegrityError> {
    if section.items().len() != wanted.len() {
        return Err(IntegrityError::ItemCountMismatch {
            path: section.path().clone(),
            len: section.items().len(),
            expected: wanted.len(),
        });
    }

    let mut moved = 0;
    for (index, item) in wanted.iter().enumerate() {
        if section.items()[index] == *item {
            continue;
        }
        let command = section.move_item(item, Some(index))?;
        emit(script, command);
        moved += 1;
    }
    Ok(moved)
}
