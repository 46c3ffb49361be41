//! Relationship sub-block detection in trailing text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{MalformedHeader, RelationshipBlock, RelationshipScan};

// A header line ending in a colon, followed directly by one or more
// `- [[link]]` lines.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([^\n]*?):[ \t]*\r?\n((?:[ \t]*- \[\[[^\]\n]*\]\][ \t]*(?:\r?\n|$))+)")
        .unwrap()
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[[^\]\n]*\]\]").unwrap());

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w[\w-]*$").unwrap());

/// Whether `name` can head a relationship sub-block: a word character
/// followed by word characters or `-`.
pub fn is_list_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Find every relationship sub-block in `text`.
pub fn find_blocks(text: &str) -> RelationshipScan {
    let mut scan = RelationshipScan::default();

    for cap in BLOCK_RE.captures_iter(text) {
        let (Some(whole), Some(header), Some(items)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            continue;
        };

        let raw = header.as_str();
        let name = raw.trim();
        if !is_list_name(name) {
            scan.malformed.push(MalformedHeader { header: raw.to_string(), offset: whole.start() });
            continue;
        }

        let name_start = header.start() + (raw.len() - raw.trim_start().len());
        let links = items
            .as_str()
            .lines()
            .filter_map(|line| LINK_RE.find(line).map(|m| m.as_str().to_string()))
            .collect();

        scan.blocks.push(RelationshipBlock {
            span: whole.range(),
            name_span: name_start..name_start + name.len(),
            name: name.to_string(),
            links,
        });
    }

    scan
}
