//! Frontmatter serialization back to a fenced block.

use super::parser::FrontmatterParseError;
use super::types::Frontmatter;
use crate::document::FENCE;

/// Render a frontmatter mapping as a leading block, fences included.
///
/// Keys keep their insertion order. The block does not end with a line
/// break; the body that follows supplies it.
pub fn render_block(fm: &Frontmatter) -> Result<String, FrontmatterParseError> {
    if fm.fields.is_empty() {
        return Ok(format!("{FENCE}\n{FENCE}"));
    }
    let yaml = serde_yaml::to_string(&fm.fields).map_err(FrontmatterParseError::Render)?;
    Ok(format!("{FENCE}\n{yaml}{FENCE}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::parse_block;
    use serde_yaml::Value;
    use serde_yaml::value::{Tag, TaggedValue};

    #[test]
    fn render_empty_block() {
        assert_eq!(render_block(&Frontmatter::default()).unwrap(), "---\n---");
    }

    #[test]
    fn render_preserves_order() {
        let mut fm = Frontmatter::default();
        fm.fields.insert(Value::String("zeta".into()), Value::Number(1.into()));
        fm.fields.insert(Value::String("alpha".into()), Value::String("two".into()));

        assert_eq!(render_block(&fm).unwrap(), "---\nzeta: 1\nalpha: two\n---");
    }

    #[test]
    fn render_quotes_links() {
        let mut fm = Frontmatter::default();
        fm.fields.insert(
            Value::String("links".into()),
            Value::Sequence(vec![Value::String("[[A]]".into())]),
        );

        let rendered = render_block(&fm).unwrap();
        let reparsed = parse_block(&rendered).unwrap();
        assert_eq!(reparsed, fm);
    }

    #[test]
    fn render_reports_unserializable_values() {
        let inner = Value::Tagged(Box::new(TaggedValue { tag: Tag::new("b"), value: Value::Null }));
        let nested = Value::Tagged(Box::new(TaggedValue { tag: Tag::new("a"), value: inner }));
        let mut fm = Frontmatter::default();
        fm.fields.insert(Value::String("title".into()), Value::String("x".into()));
        fm.fields.insert(Value::String("odd".into()), nested);

        assert!(matches!(render_block(&fm), Err(FrontmatterParseError::Render(_))));
    }
}
