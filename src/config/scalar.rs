//! Scalar interpretation for configuration tokens.

use super::ConfigValue;

/// Interprets a raw scalar token.
///
/// The token is trimmed first. A value wrapped in one matching pair of single
/// or double quotes is returned verbatim without the quotes (no escape
/// processing). Unquoted `true`/`false` in any letter case become booleans;
/// everything else is kept as the trimmed string.
#[must_use]
pub fn parse_scalar(raw: &str) -> ConfigValue {
    let value = raw.trim();
    if value.is_empty() {
        return ConfigValue::String(String::new());
    }

    if let Some(inner) = strip_matching_quotes(value) {
        return ConfigValue::String(inner.to_string());
    }

    if value.eq_ignore_ascii_case("true") {
        ConfigValue::Boolean(true)
    } else if value.eq_ignore_ascii_case("false") {
        ConfigValue::Boolean(false)
    } else {
        ConfigValue::String(value.to_string())
    }
}

fn strip_matching_quotes(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}
