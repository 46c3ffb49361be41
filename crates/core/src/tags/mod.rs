//! Tag handling: inline markers and the known tag set of a document.

mod inline;

pub use inline::{TagRemoval, extract_inline_tags, is_tag_char, remove_inline_tag};

use crate::document::Document;
use crate::frontmatter::Frontmatter;

/// Marker-prefixed tags of a document, structured tags first, deduplicated
/// case-insensitively.
pub fn known_tags(doc: &Document, frontmatter: Option<&Frontmatter>) -> Vec<String> {
    let structured = frontmatter.map(Frontmatter::tags).unwrap_or_default();
    let inline = extract_inline_tags(doc.body())
        .into_iter()
        .chain(extract_inline_tags(doc.trailing()));

    let mut seen: Vec<String> = Vec::new();
    for tag in structured.into_iter().chain(inline) {
        let marked = format!("#{tag}");
        if !seen.iter().any(|t| t.to_lowercase() == marked.to_lowercase()) {
            seen.push(marked);
        }
    }
    seen
}

/// Whether `tags` (marker-prefixed) holds `tag` (with or without marker).
pub fn contains_tag(tags: &[String], tag: &str) -> bool {
    let wanted = format!("#{}", tag.trim_start_matches('#')).to_lowercase();
    tags.iter().any(|t| t.to_lowercase() == wanted)
}
