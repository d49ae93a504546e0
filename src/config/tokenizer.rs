//! Line tokenizer for the indentation-structured configuration format.
//!
//! Each significant line becomes a [`LineToken`] carrying its indent width,
//! its content with comments and surrounding whitespace removed, and its
//! source line number. Blank and comment-only lines are dropped.

use super::ConfigError;

/// Marker that opens a sequence item.
pub(crate) const SEQUENCE_MARKER: char = '-';

/// A significant configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineToken {
    /// Number of leading spaces.
    pub indent: usize,
    /// Line content without indentation, comments, or trailing whitespace.
    pub content: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

impl LineToken {
    /// Returns true when the token opens a sequence item (`-` alone or `- ...`).
    #[must_use]
    pub fn is_sequence_item(&self) -> bool {
        sequence_item_content(&self.content).is_some()
    }
}

/// Returns the text following the sequence marker, or `None` if `content` is
/// not a sequence item.
pub(crate) fn sequence_item_content(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(SEQUENCE_MARKER)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

/// Removes a trailing `#` comment that is not inside single or double quotes.
///
/// Quote states are tracked independently: a `'` inside a double-quoted span
/// is literal, and vice versa.
#[must_use]
pub fn strip_comments(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;

    for (offset, ch) in line.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => return &line[..offset],
            _ => {}
        }
    }
    line
}

/// Splits configuration text into significant line tokens.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidIndentation`] when a line's leading
/// whitespace contains anything other than spaces (tabs included).
pub fn tokenize(text: &str) -> Result<Vec<LineToken>, ConfigError> {
    let mut tokens = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comments(raw_line).trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let leading = &line[..line.len() - line.trim_start().len()];
        if leading.chars().any(|ch| ch != ' ') {
            return Err(ConfigError::InvalidIndentation { line: line_number });
        }

        tokens.push(LineToken {
            indent: leading.len(),
            content: line[leading.len()..].to_string(),
            line: line_number,
        });
    }

    Ok(tokens)
}
