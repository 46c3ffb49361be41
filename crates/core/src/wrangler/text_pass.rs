//! The combined body/trailing rewrite for one document.
//!
//! Runs against one text snapshot: tag edits first, then inline field moves,
//! then relationship sync. The leading block is left as read; the metadata
//! changes are returned as queued operations for the caller to apply in
//! separate transactions afterwards.

use serde_yaml::Value;

use crate::document::Document;
use crate::edits::{EditSet, Options, PropertyAction, TagAction};
use crate::frontmatter::{Frontmatter, FrontmatterParseError, MetadataOp, parse_block};
use crate::inline_fields::{turn_frontmatter, turn_inline};
use crate::relations::sync_relationships;
use crate::tags::{contains_tag, known_tags, remove_inline_tag};

/// Metadata operations produced by the text pass, grouped in the order they
/// must be applied.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct QueuedOps {
    pub tags: Vec<MetadataOp>,
    pub inline_moves: Vec<MetadataOp>,
    pub relationships: Vec<MetadataOp>,
    pub warnings: Vec<String>,
}

impl QueuedOps {
    pub fn groups(&self) -> [&[MetadataOp]; 3] {
        [&self.tags, &self.inline_moves, &self.relationships]
    }
}

/// Whether the document needs a text pass at all.
pub(crate) fn needed(edits: &EditSet, options: Options) -> bool {
    !edits.tags.is_empty() || options.sync_relationship_lists || edits.has_inline_moves()
}

pub(crate) fn run(
    text: &str,
    edits: &EditSet,
    options: Options,
) -> Result<(String, QueuedOps), FrontmatterParseError> {
    let mut doc = Document::parse(text);
    let frontmatter = if doc.has_leading() { Some(parse_block(doc.leading())?) } else { None };
    let mut queued = QueuedOps::default();

    apply_tag_edits(&mut doc, frontmatter.as_ref(), edits, &mut queued);
    apply_inline_moves(&mut doc, frontmatter.as_ref(), edits, &mut queued);

    if options.sync_relationship_lists {
        let outcome = sync_relationships(doc.trailing(), edits);
        for header in &outcome.malformed {
            tracing::warn!("Skipping relationship list with malformed header '{}'", header.header);
            queued.warnings.push(format!(
                "malformed relationship header '{}' skipped",
                header.header.trim()
            ));
        }
        *doc.trailing_mut() = outcome.trailing;
        queued.relationships = outcome
            .writes
            .into_iter()
            .map(|write| MetadataOp::Set {
                key: write.key,
                value: Value::Sequence(write.links.into_iter().map(Value::String).collect()),
            })
            .collect();
    }

    Ok((doc.assemble(), queued))
}

fn apply_tag_edits(
    doc: &mut Document,
    frontmatter: Option<&Frontmatter>,
    edits: &EditSet,
    queued: &mut QueuedOps,
) {
    let known = known_tags(doc, frontmatter);

    for (tag, action) in &edits.tags {
        match action {
            TagAction::Delete => {
                if !contains_tag(&known, tag) {
                    continue;
                }
                let structured = frontmatter.map(Frontmatter::tags).unwrap_or_default();
                if structured.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
                    queued.tags.push(MetadataOp::RemoveTag(tag.clone()));
                }

                let body = remove_inline_tag(doc.body(), tag);
                let trailing = remove_inline_tag(doc.trailing(), tag);
                tracing::debug!(
                    "Removed {} inline occurrence(s) of #{tag}",
                    body.removals + trailing.removals
                );
                *doc.body_mut() = body.content;
                *doc.trailing_mut() = trailing.content;
            }
            TagAction::Add => queued.tags.push(MetadataOp::AddTag(tag.clone())),
        }
    }
}

fn apply_inline_moves(
    doc: &mut Document,
    frontmatter: Option<&Frontmatter>,
    edits: &EditSet,
    queued: &mut QueuedOps,
) {
    for (name, action) in &edits.properties {
        match action {
            PropertyAction::TurnInline => {
                let Some(frontmatter) = frontmatter else {
                    continue;
                };
                match turn_inline(doc, frontmatter, name) {
                    Ok(Some(op)) => queued.inline_moves.push(op),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("{e}");
                        queued.warnings.push(e.to_string());
                    }
                }
            }
            PropertyAction::TurnFrontmatter => {
                if let Some(op) = turn_frontmatter(doc, name) {
                    queued.inline_moves.push(op);
                }
            }
            PropertyAction::Delete | PropertyAction::Rename { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_edits(tag: &str, action: TagAction) -> EditSet {
        let mut edits = EditSet::default();
        edits.tags.insert(tag.into(), action);
        edits
    }

    #[test]
    fn tag_delete_rewrites_body_and_queues_structured_removal() {
        let text = "---\ntags: [foo]\n---\nSome #foo text\n";
        let delete = tag_edits("foo", TagAction::Delete);
        let (out, queued) = run(text, &delete, Options::default()).unwrap();

        assert_eq!(out, "---\ntags: [foo]\n---\nSome text\n");
        assert_eq!(queued.tags, vec![MetadataOp::RemoveTag("foo".into())]);
    }

    #[test]
    fn tag_delete_skips_unknown_tags() {
        let text = "Body #foobar\n";
        let delete = tag_edits("foo", TagAction::Delete);
        let (out, queued) = run(text, &delete, Options::default()).unwrap();

        assert_eq!(out, text);
        assert!(queued.tags.is_empty());
    }

    #[test]
    fn inline_only_tag_queues_no_metadata_op() {
        let text = "---\ntitle: x\n---\n#Foo first\n";
        let delete = tag_edits("foo", TagAction::Delete);
        let (out, queued) = run(text, &delete, Options::default()).unwrap();

        assert_eq!(out, "---\ntitle: x\n---\nfirst\n");
        assert!(queued.tags.is_empty());
    }

    #[test]
    fn sync_queues_lists_and_keeps_leading_text() {
        let text = "---\nTitle: x\n---\nbody\n---\nrel:\n- [[A]]\n- [[B]]\n";
        let mut edits = EditSet::default();
        edits.properties.insert("rel".into(), PropertyAction::Rename { to: "links".into() });
        let options = Options { sync_relationship_lists: true, ..Options::default() };

        let (out, queued) = run(text, &edits, options).unwrap();

        assert_eq!(out, "---\nTitle: x\n---\nbody\n---\nlinks:\n- [[A]]\n- [[B]]\n");
        assert_eq!(
            queued.relationships,
            vec![MetadataOp::Set {
                key: "links".into(),
                value: Value::Sequence(vec!["[[A]]".into(), "[[B]]".into()]),
            }]
        );
    }

    #[test]
    fn relationships_untouched_without_sync() {
        let text = "body\n---\nrel:\n- [[A]]\n";
        let mut edits = tag_edits("x", TagAction::Add);
        edits.properties.insert("rel".into(), PropertyAction::Delete);

        let (out, queued) = run(text, &edits, Options::default()).unwrap();
        assert_eq!(out, text);
        assert!(queued.relationships.is_empty());
        assert_eq!(queued.tags, vec![MetadataOp::AddTag("x".into())]);
    }

    #[test]
    fn broken_frontmatter_is_an_error() {
        let delete = tag_edits("a", TagAction::Delete);
        let result = run("---\n: [\n---\nbody #a\n", &delete, Options::default());
        assert!(result.is_err());
    }
}
