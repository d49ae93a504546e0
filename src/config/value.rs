//! Generic configuration value tree.
//!
//! The parser produces this untyped tree; the loader validates it into
//! [`ReleaseContext`](super::ReleaseContext) records. Mappings keep insertion
//! order, and re-inserting a key replaces the earlier value in place.

use indexmap::IndexMap;

/// Order-preserving mapping of keys to values.
pub type Mapping = IndexMap<String, ConfigValue>;

/// A parsed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Scalar recognised as `true`/`false` (case-insensitive, unquoted).
    Boolean(bool),
    /// Any other scalar, including the empty string.
    String(String),
    /// Ordered list of items introduced with `- `.
    Sequence(Vec<ConfigValue>),
    /// Nested `key: value` block.
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns the string content when this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean when this is a boolean scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the mapping when this is a mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items when this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` when this is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_accessors_match_variant() {
        let value = ConfigValue::from("text");
        assert_eq!(value.as_str(), Some("text"));
        assert_eq!(value.as_bool(), None);
        assert!(value.as_mapping().is_none());

        let flag = ConfigValue::from(true);
        assert_eq!(flag.as_bool(), Some(true));
        assert_eq!(flag.as_str(), None);
    }

    #[test]
    fn test_config_value_get_only_on_mappings() {
        let mut map = Mapping::new();
        map.insert("baseURL".to_string(), "https://example.test".into());
        let value = ConfigValue::from(map);

        assert_eq!(
            value.get("baseURL").and_then(ConfigValue::as_str),
            Some("https://example.test")
        );
        assert!(value.get("missing").is_none());
        assert!(ConfigValue::from("scalar").get("baseURL").is_none());
    }

    #[test]
    fn test_mapping_reinsert_keeps_position_and_replaces_value() {
        let mut map = Mapping::new();
        map.insert("a".to_string(), "1".into());
        map.insert("b".to_string(), "2".into());
        map.insert("a".to_string(), "3".into());

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&ConfigValue::from("3")));
    }
}
