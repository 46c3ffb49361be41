//! Edit plans stored as TOML files.

use super::reducer::UserAction;
use super::types::{EditSet, Options};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),
}

/// An edit set together with its options.
///
/// ```toml
/// [options]
/// sync_relationship_lists = true
///
/// [properties.status]
/// action = "rename"
/// to = "state"
///
/// [tags.todo]
/// action = "delete"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPlan {
    #[serde(default)]
    pub options: Options,
    #[serde(flatten)]
    pub edits: EditSet,
}

impl EditPlan {
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let s = fs::read_to_string(path)
            .map_err(|e| PlanError::ReadError(path.display().to_string(), e))?;
        Self::from_toml(&s).map_err(|e| PlanError::ParseError(path.display().to_string(), e))
    }

    /// Parse a plan, normalizing names the same way the reducer does.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let raw: EditPlan = toml::from_str(s)?;

        let properties = raw
            .edits
            .properties
            .into_iter()
            .map(|(name, action)| UserAction::SetProperty { name, action });
        let tags =
            raw.edits.tags.into_iter().map(|(tag, action)| UserAction::SetTag { tag, action });
        let edits = properties.chain(tags).fold(EditSet::default(), EditSet::reduce);

        Ok(Self { options: raw.options, edits })
    }
}
