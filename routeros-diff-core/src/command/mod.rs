//! Typed edit commands and their canonical text form.

mod grammar;

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::error::IntegrityError;
use crate::item::{format_values, Identifier, Values};
use crate::order::OrderMode;
use crate::path::SectionPath;

pub use grammar::GrammarError;

/// One edit operation inside a section.
///
/// Indices and destinations are 0-based positions into the section's item
/// list as it stands when the command runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command {
    /// Insert an item, before `destination` when given, else at the end.
    Add {
        values: Values,
        #[serde(skip_serializing_if = "Option::is_none")]
        destination: Option<usize>,
    },
    /// Delete the item at `index`.
    Remove { index: usize },
    /// Move the item at `index` so that it lands before the item that sat at
    /// `destination` before the move; `None` moves it to the end.
    Move {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        destination: Option<usize>,
    },
    /// Merge values into the setting named by `identifier`.
    Set {
        identifier: Identifier,
        values: Values,
    },
}

impl Command {
    /// Parse a single command line such as `move 3 1`.
    pub fn parse(line: &str) -> Result<Self, GrammarError> {
        grammar::parse(line)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Move { .. } => "move",
            Self::Set { .. } => "set",
        }
    }

    /// True when the command addresses items by their current numeric index.
    pub fn requires_fresh_indices(&self) -> bool {
        match self {
            Self::Remove { .. } | Self::Move { .. } => true,
            Self::Add { destination, .. } => destination.is_some(),
            Self::Set { identifier, .. } => identifier.is_numeric(),
        }
    }

    /// True when the command shifts the device's numeric indices.
    pub fn invalidates_indices(&self) -> bool {
        match self {
            Self::Remove { .. } | Self::Move { .. } => true,
            Self::Add { destination, .. } => destination.is_some(),
            Self::Set { .. } => false,
        }
    }

    /// Reject positional commands that the section's order mode forbids.
    pub fn check_allowed(&self, path: &SectionPath, mode: OrderMode) -> Result<(), IntegrityError> {
        match self {
            Self::Add {
                destination: Some(_),
                ..
            } if !mode.allows_positional_insert() => {
                Err(IntegrityError::PositionalInsertNotAllowed {
                    path: path.clone(),
                    mode,
                })
            }
            Self::Move { .. } if !mode.is_ordered() => Err(IntegrityError::MoveNotAllowed {
                path: path.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add {
                values,
                destination,
            } => {
                write!(f, "add {}", format_values(values))?;
                if let Some(destination) = destination {
                    write!(f, " place-before={destination}")?;
                }
                Ok(())
            }
            Self::Remove { index } => write!(f, "remove {index}"),
            Self::Move { index, destination } => {
                write!(f, "move {index}")?;
                if let Some(destination) = destination {
                    write!(f, " {destination}")?;
                }
                Ok(())
            }
            Self::Set { identifier, values } => {
                f.write_str("set")?;
                if *identifier != Identifier::Section {
                    write!(f, " {identifier}")?;
                }
                write!(f, " {}", format_values(values))
            }
        }
    }
}
