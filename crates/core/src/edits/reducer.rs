//! Building an edit set from individual user choices.

use super::types::{EditSet, PropertyAction, TagAction};

/// One choice made on a selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Select an action for a property, replacing any pending one.
    SetProperty { name: String, action: PropertyAction },
    /// Drop the pending action for a property.
    CancelProperty(String),
    /// Select an action for a tag, replacing any pending one.
    SetTag { tag: String, action: TagAction },
    /// Drop the pending action for a tag.
    CancelTag(String),
    /// The tag typed into an "add tag" field changed from `previous` to `tag`.
    RetypeAddedTag { previous: Option<String>, tag: String },
}

impl EditSet {
    /// Fold one user action into the edit set.
    pub fn reduce(mut self, action: UserAction) -> EditSet {
        match action {
            UserAction::SetProperty { name, action } => {
                self.properties.insert(name.trim().to_string(), action);
            }
            UserAction::CancelProperty(name) => {
                self.properties.remove(name.trim());
            }
            UserAction::SetTag { tag, action } => {
                self.tags.insert(normalize_tag(&tag), action);
            }
            UserAction::CancelTag(tag) => {
                self.tags.remove(&normalize_tag(&tag));
            }
            UserAction::RetypeAddedTag { previous, tag } => {
                if let Some(previous) = previous {
                    let previous = normalize_tag(&previous);
                    if self.tags.get(&previous) == Some(&TagAction::Add) {
                        self.tags.remove(&previous);
                    }
                }
                let tag = normalize_tag(&tag);
                if !tag.is_empty() {
                    self.tags.insert(tag, TagAction::Add);
                }
            }
        }
        self
    }
}

/// Strip whitespace and the `#` marker from a tag name.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_string()
}
