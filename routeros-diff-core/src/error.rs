use std::path::PathBuf;

use thiserror::Error;

use crate::item::Item;
use crate::order::OrderMode;
use crate::parser::ParseError;
use crate::path::SectionPath;
use crate::script::Script;
use crate::session::DeviceError;

/// A local-model invariant would be violated by an edit.
///
/// These are never recovered from: they point at a stale model or at a
/// script that does not belong to the tree it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("{path}: item already present: {item}")]
    DuplicateItem { path: SectionPath, item: Item },
    #[error("{path}: item not found: {item}")]
    MissingItem { path: SectionPath, item: Item },
    #[error("{path}: index {index} out of range ({len} items)")]
    IndexOutOfRange {
        path: SectionPath,
        index: usize,
        len: usize,
    },
    #[error("{path}: destination {destination} out of range ({len} items)")]
    DestinationOutOfRange {
        path: SectionPath,
        destination: usize,
        len: usize,
    },
    #[error("{path}: place-before is not allowed in an {mode} section")]
    PositionalInsertNotAllowed { path: SectionPath, mode: OrderMode },
    #[error("{path}: move is not allowed in an unordered section")]
    MoveNotAllowed { path: SectionPath },
    #[error("{path}: cannot reorder {len} item(s) into {expected}")]
    ItemCountMismatch {
        path: SectionPath,
        len: usize,
        expected: usize,
    },
}

/// A tree still differs from the state it was expected to reach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("configuration did not converge: {} residual command(s)", .residual.len())]
pub struct ConvergenceError {
    /// Script that would still be needed to reach the expected state.
    pub residual: Script,
}

/// Any failure surfaced by the crate's top-level operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
    #[error("device rejected {line:?}: {source}")]
    Device {
        line: String,
        #[source]
        source: DeviceError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
