use thiserror::Error;

use super::Command;
use crate::item::{Identifier, Values};
use crate::lexer::{self, LexError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("`{0}` needs more arguments")]
    MissingArgument(&'static str),
    #[error("expected key=value, found {0:?}")]
    NotAPair(String),
    #[error("invalid index {0:?}")]
    InvalidIndex(String),
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
    #[error("unterminated [ ... ] locator")]
    UnterminatedLocator,
}

pub(super) fn parse(line: &str) -> Result<Command, GrammarError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(GrammarError::Empty);
    }
    let end = line
        .find(|c: char| c.is_whitespace() || c == ';')
        .unwrap_or(line.len());
    let (keyword, rest) = line.split_at(end);

    match keyword {
        "add" => parse_add(rest),
        "remove" => parse_remove(rest),
        "move" => parse_move(rest),
        "set" => parse_set(rest),
        other => Err(GrammarError::UnknownCommand(other.to_string())),
    }
}

fn words(text: &str) -> Result<Vec<String>, GrammarError> {
    Ok(lexer::split_words(text)?
        .into_iter()
        .map(|word| word.text)
        .collect())
}

fn pairs<I>(words: I) -> Result<Values, GrammarError>
where
    I: IntoIterator<Item = String>,
{
    words
        .into_iter()
        .map(|word| lexer::split_pair(&word).ok_or(GrammarError::NotAPair(word)))
        .collect()
}

fn parse_index(word: &str) -> Result<usize, GrammarError> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GrammarError::InvalidIndex(word.to_string()));
    }
    word.parse()
        .map_err(|_| GrammarError::InvalidIndex(word.to_string()))
}

fn parse_add(rest: &str) -> Result<Command, GrammarError> {
    let mut values = pairs(words(rest)?)?;
    let destination = values
        .remove("place-before")
        .map(|value| parse_index(&value))
        .transpose()?;
    if values.is_empty() {
        return Err(GrammarError::MissingArgument("add"));
    }
    Ok(Command::Add {
        values,
        destination,
    })
}

fn parse_remove(rest: &str) -> Result<Command, GrammarError> {
    let mut words = words(rest)?.into_iter();
    let first = words.next().ok_or(GrammarError::MissingArgument("remove"))?;
    if let Some(extra) = words.next() {
        return Err(GrammarError::UnexpectedArgument(extra));
    }
    Ok(Command::Remove {
        index: parse_index(&first)?,
    })
}

fn parse_move(rest: &str) -> Result<Command, GrammarError> {
    let mut words = words(rest)?.into_iter();
    let first = words.next().ok_or(GrammarError::MissingArgument("move"))?;
    let index = parse_index(&first)?;

    let destination = match words.next() {
        None => None,
        Some(word) => {
            let text = match lexer::split_pair(&word) {
                Some((key, value)) if key == "destination" => value,
                _ => word,
            };
            Some(parse_index(&text)?)
        }
    };
    if let Some(extra) = words.next() {
        return Err(GrammarError::UnexpectedArgument(extra));
    }
    Ok(Command::Move { index, destination })
}

fn parse_set(rest: &str) -> Result<Command, GrammarError> {
    let rest = rest.trim_start();
    let (identifier, values) = if rest.starts_with('[') {
        let end = locator_end(rest)?;
        let (locator, tail) = rest.split_at(end);
        (
            Identifier::Dynamic(locator.to_string()),
            pairs(words(tail)?)?,
        )
    } else {
        let mut words = words(rest)?.into_iter().peekable();
        let identifier = match words.next_if(|word| !word.contains('=')) {
            Some(word) => Identifier::from_word(&word),
            None => Identifier::Section,
        };
        (identifier, pairs(words)?)
    };

    if values.is_empty() {
        return Err(GrammarError::MissingArgument("set"));
    }
    Ok(Command::Set { identifier, values })
}

/// Byte offset just past the `]` closing the locator that opens `text`.
fn locator_end(text: &str) -> Result<usize, GrammarError> {
    let mut depth = 0usize;
    let mut quoted = false;
    let mut chars = text.char_indices();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => quoted = !quoted,
            '[' if !quoted => depth += 1,
            ']' if !quoted => {
                depth -= 1;
                if depth == 0 {
                    return Ok(offset + 1);
                }
            }
            _ => {}
        }
    }
    Err(GrammarError::UnterminatedLocator)
}
