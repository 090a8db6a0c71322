//! Configuration model and edit-script engine for RouterOS exports.
//!
//! Export text is parsed into a [`SectionTree`]; two trees are compared with
//! [`diff`] into a [`Script`] of `add`/`remove`/`move`/`set` commands whose
//! numeric indices are valid at the moment each command runs; [`apply`]
//! replays a script offline and [`render`] turns it into lines for display or
//! for a device.

pub mod apply;
pub mod command;
pub mod convergence;
pub mod diff;
pub mod error;
pub mod format;
pub mod item;
pub mod lexer;
pub mod order;
pub mod parser;
pub mod path;
pub mod script;
pub mod session;
pub mod tree;
pub mod writer;

pub use apply::{apply, apply_in_place};
pub use command::{Command, GrammarError};
pub use convergence::check_convergence;
pub use diff::{diff, merge};
pub use error::{ConvergenceError, Error, IntegrityError};
pub use format::{format_json, format_summary, format_text, render, RenderMode};
pub use item::{Identifier, Item, Setting, Values};
pub use order::{OrderMode, OrderRule, OrderRuleError, OrderTable};
pub use parser::{
    parse, parse_file, parse_file_with, parse_script, parse_script_with, parse_with, ParseError,
    ParseErrorKind,
};
pub use path::SectionPath;
pub use script::{Script, ScriptSection};
pub use session::{execute, reconcile, Device, DeviceError, Outcome};
pub use tree::{Section, SectionId, SectionTree};
pub use writer::{export, write_file, WriteError};
