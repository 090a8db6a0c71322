use std::collections::BTreeMap;

use crate::command::Command;
use crate::error::IntegrityError;
use crate::item::{Identifier, Item, Setting, Values};
use crate::order::OrderMode;
use crate::path::SectionPath;

use super::SectionId;

/// One node of a [`SectionTree`](super::SectionTree).
///
/// A section owns its items and settings. Parent and children are arena ids,
/// so a section never holds a reference to another section.
#[derive(Debug, Clone)]
pub struct Section {
    path: SectionPath,
    mode: OrderMode,
    parent: Option<SectionId>,
    pub(super) children: Vec<SectionId>,
    items: Vec<Item>,
    settings: BTreeMap<Identifier, Setting>,
    log: Vec<Command>,
}

impl Section {
    pub(super) fn new(path: SectionPath, mode: OrderMode, parent: Option<SectionId>) -> Self {
        Self {
            path,
            mode,
            parent,
            children: Vec::new(),
            items: Vec::new(),
            settings: BTreeMap::new(),
            log: Vec::new(),
        }
    }

    pub fn path(&self) -> &SectionPath {
        &self.path
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    pub fn setting(&self, identifier: &Identifier) -> Option<&Setting> {
        self.settings.get(identifier)
    }

    /// Commands loaded into this section, in the order they were applied.
    pub fn log(&self) -> &[Command] {
        &self.log
    }

    /// True when the section holds at least one item or setting.
    pub fn has_content(&self) -> bool {
        !self.items.is_empty() || !self.settings.is_empty()
    }

    pub fn position(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    pub(crate) fn settings_map(&self) -> &BTreeMap<Identifier, Setting> {
        &self.settings
    }

    /// Insert `item` before `destination`, or at the end.
    ///
    /// A destination at or past the last position is normalized to an append,
    /// and the returned `Add` carries the normalized destination.
    pub fn insert_item(
        &mut self,
        item: Item,
        destination: Option<usize>,
    ) -> Result<Command, IntegrityError> {
        let destination = match destination {
            Some(destination) => {
                if !self.mode.allows_positional_insert() {
                    return Err(IntegrityError::PositionalInsertNotAllowed {
                        path: self.path.clone(),
                        mode: self.mode,
                    });
                }
                self.normalize_destination(destination)?
            }
            None => None,
        };
        if self.position(&item).is_some() {
            return Err(IntegrityError::DuplicateItem {
                path: self.path.clone(),
                item,
            });
        }

        let values = item.values().clone();
        match destination {
            Some(destination) => self.items.insert(destination, item),
            None => self.items.push(item),
        }
        Ok(Command::Add {
            values,
            destination,
        })
    }

    /// Remove `item` and return a `Remove` naming the index it occupied.
    pub fn delete_item(&mut self, item: &Item) -> Result<Command, IntegrityError> {
        let index = self.require_position(item)?;
        self.items.remove(index);
        Ok(Command::Remove { index })
    }

    /// Move `item` so it ends up before the item currently at `destination`,
    /// or at the end when `destination` is `None`. `Some(0)` moves it to the
    /// front.
    pub fn move_item(
        &mut self,
        item: &Item,
        destination: Option<usize>,
    ) -> Result<Command, IntegrityError> {
        if !self.mode.is_ordered() {
            return Err(IntegrityError::MoveNotAllowed {
                path: self.path.clone(),
            });
        }
        let destination = match destination {
            Some(destination) => self.normalize_move_destination(destination)?,
            None => None,
        };
        let index = self.require_position(item)?;

        let moved = self.items.remove(index);
        match destination {
            Some(before) => {
                // Removal shifted everything after `index` down by one.
                let slot = if index < before { before - 1 } else { before };
                self.items.insert(slot, moved);
            }
            None => self.items.push(moved),
        }
        Ok(Command::Move { index, destination })
    }

    /// Merge `setting` into the existing one with the same identifier.
    ///
    /// Returns a `Set` holding only the keys whose value changed, or `None`
    /// when nothing changed.
    pub fn set_settings(&mut self, setting: Setting) -> Option<Command> {
        let identifier = setting.identifier().clone();
        let current = self
            .settings
            .entry(identifier.clone())
            .or_insert_with(|| Setting::new(identifier.clone(), Values::new()));

        let mut changed = Values::new();
        for (key, value) in setting.values() {
            if current.values().get(key) != Some(value) {
                changed.insert(key.clone(), value.clone());
            }
        }
        current.values_mut().extend(changed.clone());

        if changed.is_empty() {
            if current.values().is_empty() {
                self.settings.remove(&identifier);
            }
            return None;
        }
        Some(Command::Set {
            identifier,
            values: changed,
        })
    }

    /// Apply `command` to this section and record it in the log.
    pub fn load_command(&mut self, command: Command) -> Result<(), IntegrityError> {
        match &command {
            Command::Add {
                values,
                destination,
            } => {
                self.insert_item(Item::new(values.clone()), *destination)?;
            }
            Command::Remove { index } => {
                let item = self.item_at(*index)?;
                self.delete_item(&item)?;
            }
            Command::Move { index, destination } => {
                let item = self.item_at(*index)?;
                self.move_item(&item, *destination)?;
            }
            Command::Set { identifier, values } => {
                self.set_settings(Setting::new(identifier.clone(), values.clone()));
            }
        }
        self.log.push(command);
        Ok(())
    }

    fn item_at(&self, index: usize) -> Result<Item, IntegrityError> {
        self.items
            .get(index)
            .cloned()
            .ok_or_else(|| IntegrityError::IndexOutOfRange {
                path: self.path.clone(),
                index,
                len: self.items.len(),
            })
    }

    fn require_position(&self, item: &Item) -> Result<usize, IntegrityError> {
        self.position(item)
            .ok_or_else(|| IntegrityError::MissingItem {
                path: self.path.clone(),
                item: item.clone(),
            })
    }

    fn normalize_destination(&self, destination: usize) -> Result<Option<usize>, IntegrityError> {
        let len = self.items.len();
        if destination > len {
            return Err(IntegrityError::DestinationOutOfRange {
                path: self.path.clone(),
                destination,
                len,
            });
        }
        Ok((destination + 1 < len).then_some(destination))
    }

    /// A move target at or past the last item is an append.
    fn normalize_move_destination(
        &self,
        destination: usize,
    ) -> Result<Option<usize>, IntegrityError> {
        let len = self.items.len();
        if destination > len {
            return Err(IntegrityError::DestinationOutOfRange {
                path: self.path.clone(),
                destination,
                len,
            });
        }
        Ok((destination < len).then_some(destination))
    }
}
