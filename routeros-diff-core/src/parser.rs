//! Reading export text into a [`SectionTree`] and script text into a
//! [`Script`].

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::command::{Command, GrammarError};
use crate::error::{Error, IntegrityError};
use crate::lexer::{self, LexError};
use crate::order::OrderTable;
use crate::path::SectionPath;
use crate::script::Script;
use crate::tree::SectionTree;

/// What went wrong on a line that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The line could not be split into words.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The line matched no command grammar.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// The command is well-formed but cannot apply to the section.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

/// A line of export or script text that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line} in {path}: {kind}: {text}")]
pub struct ParseError {
    /// 1-based line number (of the first physical line when wrapped).
    pub line: usize,
    /// The offending logical line, trimmed.
    pub text: String,
    /// Section path in effect for the line.
    pub path: SectionPath,
    pub kind: ParseErrorKind,
}

enum Statement<'a> {
    Comment(&'a str),
    Enter(SectionPath),
    Command(SectionPath, Command),
}

/// Words that end the path part of a `/path verb ...` line.
const VERBS: &[&str] = &["add", "remove", "move", "set", "print"];

/// Split a `/`-prefixed line into its path and the command text after it.
fn split_path_line(line: &str) -> Result<(SectionPath, Option<&str>), LexError> {
    let mut segments = Vec::new();
    for word in lexer::split_words(line)? {
        let bare = word.text.trim_start_matches('/');
        let slashes = word.text.len() - bare.len();
        // `/set ...` addresses the root itself.
        if VERBS.contains(&bare) && (slashes == 0 || segments.is_empty()) {
            return Ok((SectionPath::new(segments), Some(&line[word.offset + slashes..])));
        }
        segments.extend(
            word.text
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
    }
    Ok((SectionPath::new(segments), None))
}

fn is_refresh(body: &str) -> bool {
    body.split(|c: char| c.is_whitespace() || c == ';').next() == Some("print")
}

/// Walk logical lines, tracking the current section and handing each
/// statement to `visit`. `print` directives are skipped.
fn walk<F>(text: &str, mut visit: F) -> Result<(), ParseError>
where
    F: FnMut(Statement<'_>) -> Result<(), ParseErrorKind>,
{
    let mut current = SectionPath::root();

    for (number, raw) in lexer::logical_lines(text) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let fail = |path: &SectionPath, kind: ParseErrorKind| ParseError {
            line: number,
            text: line.to_string(),
            path: path.clone(),
            kind,
        };

        if let Some(comment) = line.strip_prefix('#') {
            visit(Statement::Comment(comment.trim())).map_err(|kind| fail(&current, kind))?;
            continue;
        }

        let (path, body) = if line.starts_with('/') {
            let (path, body) =
                split_path_line(line).map_err(|source| fail(&current, source.into()))?;
            match body {
                Some(body) => (path, body),
                None => {
                    current = path.clone();
                    visit(Statement::Enter(path)).map_err(|kind| fail(&current, kind))?;
                    continue;
                }
            }
        } else {
            (current.clone(), line)
        };

        if is_refresh(body) {
            continue;
        }
        let command = Command::parse(body).map_err(|source| fail(&path, source.into()))?;
        visit(Statement::Command(path.clone(), command)).map_err(|kind| fail(&path, kind))?;
    }
    Ok(())
}

/// Parse export text into a tree, using the built-in order table.
pub fn parse(text: &str) -> Result<SectionTree, ParseError> {
    parse_with(text, OrderTable::builtin())
}

/// Parse export text into a tree whose sections take modes from `order`.
///
/// Every command is replayed onto the tree as it is read, so a `remove` or
/// `move` must refer to an item defined earlier in the text.
pub fn parse_with(text: &str, order: OrderTable) -> Result<SectionTree, ParseError> {
    let mut tree = SectionTree::with_order_table(order);
    let mut commands = 0usize;

    walk(text, |statement| {
        match statement {
            Statement::Comment(comment) => {
                if tree.version().is_none() {
                    if let Some(version) = lexer::version_from_comment(comment) {
                        tree.set_version(Some(version));
                    }
                }
            }
            Statement::Enter(path) => {
                tree.ensure(&path);
            }
            Statement::Command(path, command) => {
                let id = tree.ensure(&path);
                tree.section_mut(id).load_command(command)?;
                commands += 1;
            }
        }
        Ok(())
    })?;

    debug!(
        "parsed {commands} command(s) into {} section(s)",
        tree.traverse().len()
    );
    Ok(tree)
}

/// Read and parse an export file with the built-in order table.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SectionTree, Error> {
    parse_file_with(path, OrderTable::builtin())
}

pub fn parse_file_with(path: impl AsRef<Path>, order: OrderTable) -> Result<SectionTree, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_with(&text, order)?)
}

/// Parse script text (pretty or wire form) without applying it.
pub fn parse_script(text: &str) -> Result<Script, ParseError> {
    parse_script_with(text, &OrderTable::builtin())
}

/// Parse script text, checking each command against the order mode that
/// `order` assigns to its section.
pub fn parse_script_with(text: &str, order: &OrderTable) -> Result<Script, ParseError> {
    let mut script = Script::new();
    walk(text, |statement| {
        if let Statement::Command(path, command) = statement {
            command.check_allowed(&path, order.mode_for(&path))?;
            script.section_mut(&path, order).push(command);
        }
        Ok(())
    })?;
    Ok(script)
}
