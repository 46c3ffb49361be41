//! Inline `#tag` markers in body and trailing text.

use regex::Regex;
use std::sync::LazyLock;

static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\p{L}\p{N}_/-]+)").unwrap());

/// Characters that continue a tag name.
pub fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

/// Result of removing a tag from a text region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRemoval {
    pub content: String,
    pub removals: usize,
}

/// Remove every inline occurrence of `#tag`.
///
/// An occurrence must start a tag (start of text or a non-tag character
/// before the marker) and end it (end of text or a non-tag character after
/// the name). One following delimiter character is removed with the tag;
/// line terminators are kept. Matching ignores case.
pub fn remove_inline_tag(text: &str, tag: &str) -> TagRemoval {
    let needle = format!("#{}", tag.trim_start_matches('#'));
    let pattern = format!("(?i){}", regex::escape(&needle));
    let Ok(re) = Regex::new(&pattern) else {
        return TagRemoval { content: text.to_string(), removals: 0 };
    };

    let mut content = String::with_capacity(text.len());
    let mut cursor = 0usize;
    let mut removals = 0usize;

    for m in re.find_iter(text) {
        if m.start() < cursor {
            continue;
        }
        let before = text[..m.start()].chars().next_back();
        if before.is_some_and(is_tag_char) {
            continue;
        }

        let after = text[m.end()..].chars().next();
        let end = match after {
            None => m.end(),
            Some(c) if is_tag_char(c) => continue,
            Some('\n' | '\r') => m.end(),
            Some(c) => m.end() + c.len_utf8(),
        };

        content.push_str(&text[cursor..m.start()]);
        cursor = end;
        removals += 1;
    }

    content.push_str(&text[cursor..]);
    TagRemoval { content, removals }
}

/// Inline tags in `text`, without the marker, in order of appearance.
pub fn extract_inline_tags(text: &str) -> Vec<String> {
    INLINE_TAG_RE
        .captures_iter(text)
        .filter(|cap| {
            let start = cap.get(0).map_or(0, |m| m.start());
            !text[..start].chars().next_back().is_some_and(is_tag_char)
        })
        .map(|cap| cap[1].to_string())
        .filter(|tag| tag.chars().any(|c| !c.is_ascii_digit()))
        .collect()
}
