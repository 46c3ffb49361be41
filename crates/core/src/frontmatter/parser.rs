//! Frontmatter parsing from markdown documents.

use super::types::Frontmatter;
use crate::document::{Document, FENCE};
use serde_yaml::Value;
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a key/value mapping")]
    NotAMapping,

    #[error("cannot render frontmatter as YAML: {0}")]
    Render(#[source] serde_yaml::Error),
}

/// Parse frontmatter from markdown content.
///
/// Returns `None` when the document has no leading block:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
pub fn parse(content: &str) -> Result<Option<Frontmatter>, FrontmatterParseError> {
    let doc = Document::parse(content);
    if !doc.has_leading() {
        return Ok(None);
    }
    parse_block(doc.leading()).map(Some)
}

/// Parse a leading block, fences included, into a mapping.
pub fn parse_block(leading: &str) -> Result<Frontmatter, FrontmatterParseError> {
    let yaml = block_contents(leading);
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(fields) => Ok(Frontmatter { fields }),
        Value::Null => Ok(Frontmatter::default()),
        _ => Err(FrontmatterParseError::NotAMapping),
    }
}

/// Text between the opening and closing fence.
fn block_contents(leading: &str) -> &str {
    let after_open = leading.split_once('\n').map_or("", |(_, rest)| rest);
    after_open.strip_suffix(FENCE).unwrap_or(after_open)
}
