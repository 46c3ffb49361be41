//! Frontmatter types and data structures.

use serde_yaml::{Mapping, Value};

/// Key holding the structured tag list.
pub const TAGS_KEY: &str = "tags";

/// Parsed leading metadata block.
///
/// Backed by [`serde_yaml::Mapping`], which keeps keys in insertion order so
/// every enumeration (casing normalization, serialization) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }

    /// Structured tags without their `#` marker.
    pub fn tags(&self) -> Vec<String> {
        self.get(TAGS_KEY).map(tag_list).unwrap_or_default()
    }
}

/// Read a `tags` value as a list. A scalar string is split on commas and
/// whitespace.
pub fn tag_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .map(|tag| tag.trim_start_matches('#').to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        Value::String(s) => split_tag_string(s),
        _ => Vec::new(),
    }
}

pub(crate) fn split_tag_string(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .map(|tag| tag.trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// A single mutation of a frontmatter mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataOp {
    /// Rename (`Some(to)`) or remove (`None`) keys as one step. Every name
    /// is matched against the keys present before the step, so a key created
    /// by one rename is never consumed by another entry. A rename overwrites
    /// an untouched key of the same name.
    EditKeys(Vec<(String, Option<String>)>),
    /// Remove a key.
    Remove(String),
    /// Rewrite every key to lowercase; later keys win on collision.
    LowercaseKeys,
    /// Drop a tag from the structured tag list.
    RemoveTag(String),
    /// Append a tag to the structured tag list unless already present.
    AddTag(String),
    /// Set a key, overwriting any existing value.
    Set { key: String, value: Value },
}
