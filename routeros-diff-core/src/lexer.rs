//! Line normalization and shell-style word splitting for export text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Errors raised while splitting a line into words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A double quote was opened and never closed.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
    /// The line ends with a lone escape character.
    #[error("dangling escape character at end of line")]
    DanglingEscape,
}

/// One word of a tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Unquoted, unescaped word text.
    pub text: String,
    /// Byte offset in the source line where the word starts.
    pub offset: usize,
}

impl Word {
    fn starting_at(offset: usize) -> Self {
        Self {
            text: String::new(),
            offset,
        }
    }
}

const CONTINUATION_INDENT: &str = "    ";

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"RouterOS\s+v?(\d[\w.\-]*)").expect("version pattern compiles")
    })
}

/// Iterate over logical lines, rejoining lines that `/export` wrapped.
///
/// A physical line ending in `\` continues on the next line when that line
/// starts with four spaces; the backslash, line break and indent are dropped.
/// Each logical line comes with the 1-based number of its first physical line.
pub fn logical_lines(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    let mut lines = text.lines().enumerate().peekable();
    std::iter::from_fn(move || {
        let (index, first) = lines.next()?;
        let mut line = first.to_string();
        while line.ends_with('\\') {
            let Some((_, next)) =
                lines.next_if(|(_, next)| next.starts_with(CONTINUATION_INDENT))
            else {
                break;
            };
            line.pop();
            line.push_str(&next[CONTINUATION_INDENT.len()..]);
        }
        Some((index + 1, line))
    })
}

/// Extract the RouterOS version from an export header comment, if any.
pub fn version_from_comment(comment: &str) -> Option<String> {
    version_re()
        .captures(comment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split a line into words.
///
/// Whitespace and unquoted `;` separate words. Double quotes group text
/// (and may appear mid-word, as in `comment="two words"`). Outside quotes a
/// backslash escapes the next character; inside quotes it only escapes `"`
/// and `\`.
pub fn split_words(line: &str) -> Result<Vec<Word>, LexError> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut quoted = false;
    let mut chars = line.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if quoted {
            let word = current.get_or_insert_with(|| Word::starting_at(offset));
            match ch {
                '"' => quoted = false,
                '\\' => match chars.next_if(|&(_, next)| next == '"' || next == '\\') {
                    Some((_, escaped)) => word.text.push(escaped),
                    None => word.text.push('\\'),
                },
                _ => word.text.push(ch),
            }
            continue;
        }

        match ch {
            c if c.is_whitespace() || c == ';' => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            '"' => {
                quoted = true;
                current.get_or_insert_with(|| Word::starting_at(offset));
            }
            '\\' => {
                let (_, escaped) = chars.next().ok_or(LexError::DanglingEscape)?;
                current
                    .get_or_insert_with(|| Word::starting_at(offset))
                    .text
                    .push(escaped);
            }
            _ => current
                .get_or_insert_with(|| Word::starting_at(offset))
                .text
                .push(ch),
        }
    }

    if quoted {
        return Err(LexError::UnterminatedQuote);
    }
    if let Some(word) = current {
        words.push(word);
    }
    Ok(words)
}

/// Split a `key=value` word on its first `=`.
///
/// The value keeps any further `=` and is trimmed. Returns `None` when the
/// word has no `=` or an empty key.
pub fn split_pair(word: &str) -> Option<(String, String)> {
    let (key, value) = word.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Quote a value so that [`split_words`] reads it back unchanged.
pub fn quote(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\\' | ';'));
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<String> {
        split_words(line)
            .expect("line should tokenize")
            .into_iter()
            .map(|w| w.text)
            .collect()
    }

    #[test]
    fn continuation_is_rejoined() {
        let text = "/ip firewall filter\nadd chain=forward comment=\\\r\n    \"long rule\" \\\n    disabled=yes\nadd chain=input\n";
        let lines: Vec<(usize, String)> = logical_lines(text).collect();
        assert_eq!(
            lines,
            vec![
                (1, "/ip firewall filter".to_string()),
                (2, "add chain=forward comment=\"long rule\" disabled=yes".to_string()),
                (5, "add chain=input".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_backslash_without_indent_is_kept() {
        let lines: Vec<(usize, String)> = logical_lines("set a=b\\\nremove 0").collect();
        assert_eq!(lines[0], (1, "set a=b\\".to_string()));
        assert_eq!(lines[1], (2, "remove 0".to_string()));
    }

    #[test]
    fn quotes_group_words_mid_token() {
        assert_eq!(
            texts(r#"add chain=test comment="two words" disabled=yes"#),
            vec!["add", "chain=test", "comment=two words", "disabled=yes"]
        );
    }

    #[test]
    fn semicolon_separates_words() {
        assert_eq!(texts("print ;remove 0"), vec!["print", "remove", "0"]);
    }

    #[test]
    fn escapes_inside_and_outside_quotes() {
        assert_eq!(texts(r#"a\ b "c\"d" "e\nf""#), vec!["a b", "c\"d", "e\\nf"]);
    }

    #[test]
    fn empty_quotes_yield_empty_word() {
        assert_eq!(texts(r#"comment="""#), vec!["comment="]);
        assert_eq!(texts(r#""""#), vec![""]);
    }

    #[test]
    fn word_offsets_point_into_line() {
        let words = split_words("ip  firewall filter").expect("tokenize");
        assert_eq!(words[1].offset, 4);
        assert_eq!(words[2].offset, 13);
    }

    #[test]
    fn unterminated_quote_and_dangling_escape_fail() {
        assert_eq!(
            split_words(r#"comment="open"#),
            Err(LexError::UnterminatedQuote)
        );
        assert_eq!(split_words("name=x\\"), Err(LexError::DanglingEscape));
    }

    #[test]
    fn pair_splits_on_first_equals_only() {
        assert_eq!(
            split_pair("a=b=c"),
            Some(("a".to_string(), "b=c".to_string()))
        );
        assert_eq!(split_pair("novalue"), None);
        assert_eq!(split_pair("=orphan"), None);
        assert_eq!(split_pair("k= padded "), Some(("k".into(), "padded".into())));
    }

    #[test]
    fn quote_round_trips_through_split() {
        for value in ["plain", "two words", "with\"quote", "back\\slash", "semi;colon", ""] {
            let word = format!("k={}", quote(value));
            let words = texts(&word);
            assert_eq!(words.len(), 1, "{word}");
            assert_eq!(split_pair(&words[0]).map(|(_, v)| v), Some(value.to_string()));
        }
    }

    #[test]
    fn version_is_read_from_header() {
        assert_eq!(
            version_from_comment("jan/02/2024 10:00:00 by RouterOS 7.13.5"),
            Some("7.13.5".to_string())
        );
        assert_eq!(version_from_comment("software id = ABCD-1234"), None);
    }
}
