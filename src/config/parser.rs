//! Block and sequence parser for the indentation-structured format.
//!
//! Two mutually recursive routines walk the token list by index. Each one is
//! parameterised by the indent that opened its block: tokens at exactly that
//! indent belong to the block, shallower tokens end it, deeper ones are an
//! error unless a nested value was announced by an empty `key:` or `-`.

use tracing::trace;

use super::scalar::parse_scalar;
use super::tokenizer::{LineToken, sequence_item_content, tokenize};
use super::value::{ConfigValue, Mapping};
use super::ConfigError;

/// Parses configuration text into a value tree.
///
/// Empty (or comment-only) text yields an empty mapping. The root is a
/// mapping, or a sequence if the first line is a sequence item.
///
/// # Errors
///
/// Returns a [`ConfigError`] naming the offending line for invalid or
/// inconsistent indentation, a mapping entry without `:`, a sequence item
/// inside a mapping block, or content left over after the root block.
pub fn parse_document(text: &str) -> Result<ConfigValue, ConfigError> {
    let tokens = tokenize(text)?;
    let Some(first) = tokens.first() else {
        return Ok(ConfigValue::Mapping(Mapping::new()));
    };
    trace!(tokens = tokens.len(), "tokenized configuration");

    let (root, index) = if first.is_sequence_item() {
        let (items, index) = parse_sequence(&tokens, 0, first.indent)?;
        (ConfigValue::Sequence(items), index)
    } else {
        let (map, index) = parse_block(&tokens, 0, first.indent)?;
        (ConfigValue::Mapping(map), index)
    };

    if let Some(extra) = tokens.get(index) {
        return Err(ConfigError::TrailingContent { line: extra.line });
    }
    Ok(root)
}

fn parse_block(
    tokens: &[LineToken],
    mut index: usize,
    indent: usize,
) -> Result<(Mapping, usize), ConfigError> {
    let mut map = Mapping::new();

    while let Some(token) = tokens.get(index) {
        if token.indent < indent {
            break;
        }
        if token.indent > indent {
            return Err(ConfigError::UnexpectedIndentation { line: token.line });
        }
        if token.is_sequence_item() {
            return Err(ConfigError::UnexpectedSequenceItem { line: token.line });
        }

        let (key, remainder) = token
            .content
            .split_once(':')
            .ok_or(ConfigError::MissingSeparator { line: token.line })?;
        let key = key.trim().to_string();
        let remainder = remainder.trim();

        if remainder.is_empty() {
            let (value, next) = parse_nested(tokens, index + 1, indent)?;
            map.insert(key, value);
            index = next;
        } else {
            map.insert(key, parse_scalar(remainder));
            index += 1;
        }
    }

    Ok((map, index))
}

fn parse_sequence(
    tokens: &[LineToken],
    mut index: usize,
    indent: usize,
) -> Result<(Vec<ConfigValue>, usize), ConfigError> {
    let mut items = Vec::new();

    while let Some(token) = tokens.get(index) {
        if token.indent < indent {
            break;
        }
        if token.indent > indent {
            return Err(ConfigError::UnexpectedIndentation { line: token.line });
        }
        let Some(item) = sequence_item_content(&token.content) else {
            break;
        };

        index += 1;
        if item.is_empty() {
            let (value, next) = parse_nested(tokens, index, indent)?;
            items.push(value);
            index = next;
        } else {
            items.push(parse_scalar(item));
        }
    }

    Ok((items, index))
}

/// Parses the value announced by an empty `key:` or bare `-` at `parent_indent`.
///
/// If the next token is not deeper than the parent, the value is an empty
/// mapping; otherwise the next token's indent opens a nested sequence or block.
fn parse_nested(
    tokens: &[LineToken],
    index: usize,
    parent_indent: usize,
) -> Result<(ConfigValue, usize), ConfigError> {
    match tokens.get(index) {
        Some(next) if next.indent > parent_indent => {
            if next.is_sequence_item() {
                let (items, index) = parse_sequence(tokens, index, next.indent)?;
                Ok((ConfigValue::Sequence(items), index))
            } else {
                let (map, index) = parse_block(tokens, index, next.indent)?;
                Ok((ConfigValue::Mapping(map), index))
            }
        }
        _ => Ok((ConfigValue::Mapping(Mapping::new()), index)),
    }
}
