//! Batch orchestration.
//!
//! [`process`] applies an edit set to documents one at a time. Per document
//! the order is fixed: property edits, key casing, the combined text pass,
//! then the metadata writes the text pass queued. A failing document is
//! recorded in the report and the batch moves on.

mod text_pass;
pub mod types;

pub use types::{
    BatchReport, Discovery, DocumentError, DocumentOutcome, OutcomeStatus, ProcessError,
};

use std::collections::BTreeSet;
use std::path::Path;

use crate::edits::{EditSet, Options, PropertyAction};
use crate::frontmatter::{MetadataOp, apply_ops};
use crate::store::{DocumentRecord, DocumentStore};

/// Apply `edits` to every document in `documents`, in order.
///
/// Fails only when the store is unavailable or the edit set is invalid;
/// both are checked before any document is touched.
pub fn process<S>(
    store: &mut S,
    documents: &[DocumentRecord],
    edits: &EditSet,
    options: Options,
) -> Result<BatchReport, ProcessError>
where
    S: DocumentStore + ?Sized,
{
    store.check_available().map_err(ProcessError::MissingDependency)?;
    edits.validate()?;

    let mut report = BatchReport::default();
    for record in documents {
        let _span = tracing::debug_span!("document", path = %record.path.display()).entered();

        let mut work = Work::default();
        let status = match process_document(store, &record.path, edits, options, &mut work) {
            Ok(()) if work.changed() => OutcomeStatus::Updated,
            Ok(()) => OutcomeStatus::Unchanged,
            Err(e) => {
                tracing::warn!("Failed to process {}: {}", record.path.display(), e);
                OutcomeStatus::Failed { reason: e.to_string() }
            }
        };
        tracing::debug!(
            metadata_writes = work.metadata_writes,
            "Processed {}: {:?}",
            record.path.display(),
            status
        );

        report.outcomes.push(DocumentOutcome {
            path: record.path.clone(),
            status,
            warnings: work.warnings,
            metadata_writes: work.metadata_writes,
            text_rewritten: work.text_rewritten,
        });
    }

    tracing::info!(
        updated = report.updated(),
        unchanged = report.unchanged(),
        failed = report.failed(),
        "Processed {} document(s)",
        report.outcomes.len()
    );
    Ok(report)
}

/// Union of property keys and tags across `documents`, lowercased and
/// sorted. Tags carry no `#` marker.
pub fn discover(documents: &[DocumentRecord]) -> Discovery {
    let mut properties = BTreeSet::new();
    let mut tags = BTreeSet::new();

    for record in documents {
        properties.extend(record.metadata.keys().map(str::to_lowercase));
        tags.extend(record.tags.iter().map(|t| t.trim_start_matches('#').to_lowercase()));
    }

    Discovery { properties: properties.into_iter().collect(), tags: tags.into_iter().collect() }
}

/// Progress on one document, kept even when a later step fails.
#[derive(Debug, Default)]
struct Work {
    warnings: Vec<String>,
    metadata_writes: usize,
    text_rewritten: bool,
}

impl Work {
    fn changed(&self) -> bool {
        self.metadata_writes > 0 || self.text_rewritten
    }
}

fn process_document<S>(
    store: &mut S,
    path: &Path,
    edits: &EditSet,
    options: Options,
    work: &mut Work,
) -> Result<(), DocumentError>
where
    S: DocumentStore + ?Sized,
{
    let key_edits: Vec<(String, Option<String>)> = edits
        .structural_property_edits()
        .map(|(name, action)| match action {
            PropertyAction::Rename { to } => (name.clone(), Some(to.clone())),
            _ => (name.clone(), None),
        })
        .collect();

    if !key_edits.is_empty() {
        apply_transaction(store, path, &[MetadataOp::EditKeys(key_edits)], work)?;
    }
    if options.convert_keys_to_lowercase {
        apply_transaction(store, path, &[MetadataOp::LowercaseKeys], work)?;
    }

    if !text_pass::needed(edits, options) {
        return Ok(());
    }

    let mut pass = None;
    let mut rewrite = |text: &str| match text_pass::run(text, edits, options) {
        Ok((next, queued)) => {
            pass = Some(Ok(queued));
            next
        }
        Err(e) => {
            pass = Some(Err(e));
            text.to_string()
        }
    };
    work.text_rewritten = store.update_text(path, &mut rewrite)?;

    let Some(queued) = pass.transpose()? else {
        return Ok(());
    };
    work.warnings.extend(queued.warnings.iter().cloned());

    for ops in queued.groups() {
        if !ops.is_empty() {
            apply_transaction(store, path, ops, work)?;
        }
    }
    Ok(())
}

fn apply_transaction<S>(
    store: &mut S,
    path: &Path,
    ops: &[MetadataOp],
    work: &mut Work,
) -> Result<(), DocumentError>
where
    S: DocumentStore + ?Sized,
{
    if store.update_metadata(path, &mut |fm| apply_ops(fm, ops))? {
        work.metadata_writes += 1;
    }
    Ok(())
}
