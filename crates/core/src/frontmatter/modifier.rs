//! Frontmatter modification operations.

use super::parser::{FrontmatterParseError, parse_block};
use super::serializer::render_block;
use super::types::{Frontmatter, MetadataOp, TAGS_KEY, split_tag_string};
use crate::document::Document;
use serde_yaml::{Mapping, Value};
use std::collections::{HashMap, HashSet};

/// Apply operations in order.
pub fn apply_ops(fm: &mut Frontmatter, ops: &[MetadataOp]) {
    for op in ops {
        apply_op(fm, op);
    }
}

/// Apply a single operation.
pub fn apply_op(fm: &mut Frontmatter, op: &MetadataOp) {
    match op {
        MetadataOp::EditKeys(edits) => edit_keys(fm, edits),
        MetadataOp::Remove(key) => {
            if let Some(key) = resolve_key(fm, key) {
                fm.fields.shift_remove(key.as_str());
            }
        }
        MetadataOp::LowercaseKeys => lowercase_keys(fm),
        MetadataOp::RemoveTag(tag) => remove_tag(fm, tag),
        MetadataOp::AddTag(tag) => add_tag(fm, tag),
        MetadataOp::Set { key, value } => {
            fm.fields.insert(Value::String(key.clone()), value.clone());
        }
    }
}

/// Rewrite the leading block of `text` through `mutate`.
///
/// Returns `None` when the mutation leaves the mapping unchanged. A document
/// without a leading block gets one only if the mapping ends up non-empty.
pub fn rewrite_document<F>(text: &str, mutate: F) -> Result<Option<String>, FrontmatterParseError>
where
    F: FnOnce(&mut Frontmatter),
{
    let mut doc = Document::parse(text);
    let before =
        if doc.has_leading() { parse_block(doc.leading())? } else { Frontmatter::default() };

    let mut after = before.clone();
    mutate(&mut after);

    let rendered = render_block(&after)?;
    if rendered == render_block(&before)? {
        return Ok(None);
    }

    if doc.has_leading() {
        doc.set_leading(rendered);
        Ok(Some(doc.assemble()))
    } else {
        Ok(Some(format!("{rendered}\n{text}")))
    }
}

/// The key `name` refers to: an exact match, else the first key equal to it
/// ignoring case.
fn resolve_key(fm: &Frontmatter, name: &str) -> Option<String> {
    if fm.contains_key(name) {
        return Some(name.to_string());
    }
    let lowered = name.to_lowercase();
    fm.keys().find(|key| key.to_lowercase() == lowered).map(ToString::to_string)
}

/// Renames keep the renamed key's position.
fn edit_keys(fm: &mut Frontmatter, edits: &[(String, Option<String>)]) {
    let mut plan: HashMap<String, Option<&str>> = HashMap::new();
    for (name, to) in edits {
        if let Some(key) = resolve_key(fm, name) {
            plan.insert(key, to.as_deref());
        }
    }
    if plan.is_empty() {
        return;
    }

    // Untouched keys that a rename lands on.
    let overwritten: HashSet<&str> = plan
        .iter()
        .filter_map(|(key, to)| match *to {
            Some(to) if to != key.as_str() && !plan.contains_key(to) => Some(to),
            _ => None,
        })
        .collect();

    let fields = std::mem::take(&mut fm.fields);
    let mut edited = Mapping::with_capacity(fields.len());
    for (key, value) in fields {
        let name = key.as_str().unwrap_or_default();
        match plan.get(name) {
            Some(None) => {}
            Some(Some(to)) => {
                edited.insert(Value::String((*to).to_string()), value);
            }
            None if key.is_string() && overwritten.contains(name) => {}
            None => {
                edited.insert(key, value);
            }
        }
    }
    fm.fields = edited;
}

fn lowercase_keys(fm: &mut Frontmatter) {
    let fields = std::mem::take(&mut fm.fields);
    let mut lowered = Mapping::with_capacity(fields.len());
    for (key, value) in fields {
        let key = match key {
            Value::String(s) => Value::String(s.to_lowercase()),
            other => other,
        };
        lowered.insert(key, value);
    }
    fm.fields = lowered;
}

fn same_tag(a: &str, b: &str) -> bool {
    a.trim_start_matches('#').to_lowercase() == b.trim_start_matches('#').to_lowercase()
}

fn remove_tag(fm: &mut Frontmatter, tag: &str) {
    let Some(value) = fm.fields.get_mut(TAGS_KEY) else {
        return;
    };

    if let Value::Sequence(items) = value {
        items.retain(|item| !item.as_str().is_some_and(|s| same_tag(s, tag)));
        return;
    }

    let tags = value.as_str().map(split_tag_string).unwrap_or_default();
    if tags.iter().any(|t| same_tag(t, tag)) {
        *value = Value::Sequence(
            tags.into_iter().filter(|t| !same_tag(t, tag)).map(Value::String).collect(),
        );
    }
}

fn add_tag(fm: &mut Frontmatter, tag: &str) {
    match fm.fields.get_mut(TAGS_KEY) {
        Some(Value::Sequence(items)) => {
            if !items.iter().any(|item| item.as_str().is_some_and(|s| same_tag(s, tag))) {
                items.push(Value::String(tag.to_string()));
            }
        }
        Some(value) if value.is_string() => {
            let mut tags = value.as_str().map(split_tag_string).unwrap_or_default();
            if !tags.iter().any(|t| same_tag(t, tag)) {
                tags.push(tag.to_string());
                *value = Value::Sequence(tags.into_iter().map(Value::String).collect());
            }
        }
        Some(value) if value.is_null() => {
            *value = Value::Sequence(vec![Value::String(tag.to_string())]);
        }
        Some(_) => {
            tracing::warn!("'{TAGS_KEY}' is neither a list nor a string, not adding '{tag}'");
        }
        None => {
            fm.fields.insert(
                Value::String(TAGS_KEY.to_string()),
                Value::Sequence(vec![Value::String(tag.to_string())]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::parse;

    fn fm(content: &str) -> Frontmatter {
        parse(content).unwrap().unwrap()
    }

    fn keys(fm: &Frontmatter) -> Vec<&str> {
        fm.keys().collect()
    }

    fn rename(from: &str, to: &str) -> (String, Option<String>) {
        (from.to_string(), Some(to.to_string()))
    }

    fn remove(name: &str) -> (String, Option<String>) {
        (name.to_string(), None)
    }

    #[test]
    fn rename_preserves_value_and_position() {
        let mut doc = fm("---\nfirst: x\na: 1\nlast: y\n---\n");
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "c")]));

        assert_eq!(keys(&doc), vec!["first", "c", "last"]);
        assert_eq!(doc.get("c").and_then(Value::as_i64), Some(1));
        assert!(!doc.contains_key("a"));
    }

    #[test]
    fn rename_overwrites_existing_target() {
        let mut doc = fm("---\nc: old\na: new\n---\n");
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "c")]));

        assert_eq!(keys(&doc), vec!["c"]);
        assert_eq!(doc.get("c").and_then(Value::as_str), Some("new"));
    }

    #[test]
    fn rename_missing_key_is_noop() {
        let mut doc = fm("---\nb: 1\n---\n");
        let before = doc.clone();
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "c"), remove("z")]));
        assert_eq!(doc, before);
    }

    #[test]
    fn edits_match_keys_ignoring_case() {
        let mut doc = fm("---\nStatus: open\nDraft: true\n---\n");
        let edits = vec![rename("status", "state"), remove("draft")];
        apply_op(&mut doc, &MetadataOp::EditKeys(edits));

        assert_eq!(keys(&doc), vec!["state"]);
    }

    #[test]
    fn renamed_key_survives_delete_of_its_new_name() {
        let mut doc = fm("---\na: 1\nb: 2\n---\n");
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "b"), remove("b")]));

        assert_eq!(keys(&doc), vec!["b"]);
        assert_eq!(doc.get("b").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn chained_renames_do_not_cascade() {
        let mut doc = fm("---\na: 1\nb: 2\nc: 3\n---\n");
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "b"), rename("b", "c")]));

        assert_eq!(keys(&doc), vec!["b", "c"]);
        assert_eq!(doc.get("b").and_then(Value::as_i64), Some(1));
        assert_eq!(doc.get("c").and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn swapped_keys_keep_both_values() {
        let mut doc = fm("---\na: 1\nb: 2\n---\n");
        apply_op(&mut doc, &MetadataOp::EditKeys(vec![rename("a", "b"), rename("b", "a")]));

        assert_eq!(keys(&doc), vec!["b", "a"]);
        assert_eq!(doc.get("a").and_then(Value::as_i64), Some(2));
        assert_eq!(doc.get("b").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn lowercase_collision_later_key_wins() {
        let mut doc = fm("---\nTitle: first\nother: 1\ntitle: second\n---\n");
        apply_op(&mut doc, &MetadataOp::LowercaseKeys);

        assert_eq!(keys(&doc), vec!["title", "other"]);
        assert_eq!(doc.get("title").and_then(Value::as_str), Some("second"));
    }

    #[test]
    fn lowercase_keeps_already_lowercase_keys() {
        let mut doc = fm("---\nstatus: open\nDue: today\n---\n");
        apply_op(&mut doc, &MetadataOp::LowercaseKeys);

        assert_eq!(keys(&doc), vec!["status", "due"]);
    }

    #[test]
    fn add_tag_deduplicates() {
        let mut doc = fm("---\ntags:\n  - Bar\n---\n");
        apply_op(&mut doc, &MetadataOp::AddTag("bar".into()));
        assert_eq!(doc.tags(), vec!["Bar"]);

        apply_op(&mut doc, &MetadataOp::AddTag("baz".into()));
        assert_eq!(doc.tags(), vec!["Bar", "baz"]);
    }

    #[test]
    fn add_tag_creates_list() {
        let mut doc = Frontmatter::default();
        apply_op(&mut doc, &MetadataOp::AddTag("bar".into()));
        assert_eq!(doc.tags(), vec!["bar"]);
    }

    #[test]
    fn remove_tag_from_list_and_string() {
        let mut list = fm("---\ntags: [foo, keep]\n---\n");
        apply_op(&mut list, &MetadataOp::RemoveTag("foo".into()));
        assert_eq!(list.tags(), vec!["keep"]);

        let mut scalar = fm("---\ntags: foo, keep\n---\n");
        apply_op(&mut scalar, &MetadataOp::RemoveTag("FOO".into()));
        assert_eq!(scalar.tags(), vec!["keep"]);
    }

    #[test]
    fn rewrite_unchanged_returns_none() {
        let text = "---\na: 1\n---\nbody\n";
        let result = rewrite_document(text, |fm| {
            apply_op(fm, &MetadataOp::Remove("missing".into()));
        })
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rewrite_replaces_only_leading_block() {
        let text = "---\na: 1\n---\nbody #tag\n---\nrel:\n- [[A]]\n";
        let result = rewrite_document(text, |fm| {
            apply_op(fm, &MetadataOp::EditKeys(vec![rename("a", "c")]));
        })
        .unwrap();
        assert_eq!(result.as_deref(), Some("---\nc: 1\n---\nbody #tag\n---\nrel:\n- [[A]]\n"));
    }

    #[test]
    fn rewrite_creates_leading_block() {
        let result = rewrite_document("# Note\n", |fm| {
            apply_op(fm, &MetadataOp::AddTag("bar".into()));
        })
        .unwrap();
        assert_eq!(result.as_deref(), Some("---\ntags:\n- bar\n---\n# Note\n"));
    }
}
