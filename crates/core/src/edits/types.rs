//! Edit set data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::relations::is_list_name;

/// What to do with a frontmatter property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PropertyAction {
    /// Remove the property.
    Delete,
    /// Move the value to another key.
    Rename { to: String },
    /// Move the value out of frontmatter into an inline `key:: value` field.
    #[serde(alias = "inline")]
    TurnInline,
    /// Move inline `key:: value` fields into frontmatter.
    #[serde(alias = "frontmatter")]
    TurnFrontmatter,
}

/// What to do with a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TagAction {
    Delete,
    Add,
}

/// Pending property and tag edits, at most one action per name.
///
/// Tag names are stored without their `#` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSet {
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyAction>,
    #[serde(default)]
    pub tags: BTreeMap<String, TagAction>,
}

/// Global switches for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub convert_keys_to_lowercase: bool,
    #[serde(default)]
    pub sync_relationship_lists: bool,
}

/// Errors found while validating an edit set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditSetError {
    #[error("property name must not be empty")]
    EmptyProperty,

    #[error("tag name must not be empty")]
    EmptyTag,

    #[error("rename of '{0}' has no target name")]
    EmptyRenameTarget(String),

    #[error("rename target '{to}' for '{from}' must be a word of letters, digits, '_' or '-'")]
    InvalidRenameTarget { from: String, to: String },

    #[error("invalid tag '{0}': tags cannot contain whitespace or '#'")]
    InvalidTag(String),
}

impl EditSet {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.tags.is_empty()
    }

    /// Look up the pending action for a property. Exact names win over
    /// case-insensitive matches.
    pub fn property_action(&self, name: &str) -> Option<&PropertyAction> {
        self.properties.get(name).or_else(|| {
            self.properties
                .iter()
                .find(|(key, _)| key.to_lowercase() == name.to_lowercase())
                .map(|(_, action)| action)
        })
    }

    /// Whether any property moves between frontmatter and inline fields.
    pub fn has_inline_moves(&self) -> bool {
        self.properties.values().any(|action| {
            matches!(action, PropertyAction::TurnInline | PropertyAction::TurnFrontmatter)
        })
    }

    /// Property edits that act directly on the frontmatter mapping.
    pub fn structural_property_edits(&self) -> impl Iterator<Item = (&String, &PropertyAction)> {
        self.properties.iter().filter(|(_, action)| {
            matches!(action, PropertyAction::Delete | PropertyAction::Rename { .. })
        })
    }

    /// Check names and rename targets before any document is touched.
    pub fn validate(&self) -> Result<(), EditSetError> {
        for (name, action) in &self.properties {
            if name.trim().is_empty() {
                return Err(EditSetError::EmptyProperty);
            }
            if let PropertyAction::Rename { to } = action {
                if to.trim().is_empty() {
                    return Err(EditSetError::EmptyRenameTarget(name.clone()));
                }
                if !is_list_name(to) {
                    return Err(EditSetError::InvalidRenameTarget {
                        from: name.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        for tag in self.tags.keys() {
            if tag.is_empty() {
                return Err(EditSetError::EmptyTag);
            }
            if tag.contains(|c: char| c.is_whitespace() || c == '#') {
                return Err(EditSetError::InvalidTag(tag.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_lookup_is_case_insensitive() {
        let mut edits = EditSet::default();
        edits.properties.insert("Related".into(), PropertyAction::Delete);

        assert_eq!(edits.property_action("related"), Some(&PropertyAction::Delete));
        assert_eq!(edits.property_action("other"), None);
    }

    #[test]
    fn validate_rejects_empty_rename_target() {
        let mut edits = EditSet::default();
        edits.properties.insert("status".into(), PropertyAction::Rename { to: " ".into() });

        assert_eq!(edits.validate(), Err(EditSetError::EmptyRenameTarget("status".into())));
    }

    #[test]
    fn validate_rejects_colon_in_rename_target() {
        let mut edits = EditSet::default();
        edits.properties.insert("a".into(), PropertyAction::Rename { to: "b:c".into() });

        assert!(matches!(edits.validate(), Err(EditSetError::InvalidRenameTarget { .. })));
    }

    #[test]
    fn validate_rejects_rename_target_that_cannot_head_a_list() {
        let mut edits = EditSet::default();
        edits.properties.insert("rel".into(), PropertyAction::Rename { to: "see also".into() });

        assert_eq!(
            edits.validate(),
            Err(EditSetError::InvalidRenameTarget { from: "rel".into(), to: "see also".into() })
        );

        edits.properties.insert("rel".into(), PropertyAction::Rename { to: "see-also".into() });
        assert_eq!(edits.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_tags_with_spaces() {
        let mut edits = EditSet::default();
        edits.tags.insert("two words".into(), TagAction::Add);

        assert_eq!(edits.validate(), Err(EditSetError::InvalidTag("two words".into())));
    }

    #[test]
    fn validate_accepts_well_formed_edits() {
        let mut edits = EditSet::default();
        edits.properties.insert("a".into(), PropertyAction::Rename { to: "b".into() });
        edits.properties.insert("c".into(), PropertyAction::TurnInline);
        edits.tags.insert("project/alpha".into(), TagAction::Delete);

        assert_eq!(edits.validate(), Ok(()));
        assert!(edits.has_inline_moves());
        assert_eq!(edits.structural_property_edits().count(), 1);
    }
}
