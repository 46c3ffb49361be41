//! Reconciling relationship sub-blocks with pending property edits.
//!
//! Header renames and block removals are collected as byte-range
//! replacements and applied from the end of the text backwards, so earlier
//! offsets stay valid.

use std::ops::Range;

use crate::edits::{EditSet, PropertyAction};

use super::detector::find_blocks;
use super::types::{RelationshipWrite, SyncOutcome};

/// Rewrite relationship sub-blocks in `trailing` and collect the link lists
/// to store in frontmatter.
///
/// Per block, the lowercased header name is looked up in `edits`:
/// `Delete` drops the whole block and writes nothing, `Rename` rewrites the
/// header and stores the list under the new name, anything else keeps the
/// block as it is.
pub fn sync_relationships(trailing: &str, edits: &EditSet) -> SyncOutcome {
    let scan = find_blocks(trailing);
    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
    let mut outcome = SyncOutcome { malformed: scan.malformed, ..Default::default() };

    for block in scan.blocks {
        let mut key = block.name.to_lowercase();

        match edits.property_action(&key) {
            Some(PropertyAction::Delete) => {
                tracing::debug!("Removing relationship block '{}'", block.name);
                replacements.push((block.span, String::new()));
                outcome.removed_blocks += 1;
                continue;
            }
            Some(PropertyAction::Rename { to }) => {
                tracing::debug!("Renaming relationship block '{}' to '{to}'", block.name);
                replacements.push((block.name_span, to.clone()));
                outcome.renamed_blocks += 1;
                key = to.clone();
            }
            _ => {}
        }

        if !block.links.is_empty() {
            outcome.writes.push(RelationshipWrite { key, links: block.links });
        }
    }

    outcome.trailing = apply_replacements(trailing, replacements);
    outcome
}

/// Replace byte ranges in `content`, last range first.
pub fn apply_replacements(content: &str, mut replacements: Vec<(Range<usize>, String)>) -> String {
    replacements.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut result = content.to_string();
    for (range, replacement) in replacements {
        if range.end <= result.len() {
            result.replace_range(range, &replacement);
        }
    }
    result
}
