//! Batch report and error types.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::edits::EditSetError;
use crate::frontmatter::FrontmatterParseError;
use crate::store::StoreError;

/// Errors that stop a batch before any document is touched.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("missing dependency: {0}")]
    MissingDependency(#[source] StoreError),

    #[error("invalid edits: {0}")]
    InvalidEdits(#[from] EditSetError),
}

/// Errors that fail a single document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid frontmatter: {0}")]
    Metadata(#[from] FrontmatterParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Unchanged,
    Updated,
    Failed { reason: String },
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Frontmatter transactions that changed the document.
    pub metadata_writes: usize,
    /// Whether body or trailing text was rewritten.
    pub text_rewritten: bool,
}

impl DocumentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Outcomes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn updated(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Updated))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn warnings(&self) -> usize {
        self.outcomes.iter().map(|o| o.warnings.len()).sum()
    }

    fn count(&self, pred: impl Fn(&OutcomeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Property keys and tags offered for selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub properties: Vec<String>,
    pub tags: Vec<String>,
}
