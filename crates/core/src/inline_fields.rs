//! Moving properties between frontmatter and inline `key:: value` fields.

use regex::Regex;
use serde_yaml::{Number, Value};
use thiserror::Error;

use crate::document::Document;
use crate::frontmatter::{Frontmatter, MetadataOp};

/// A frontmatter value that has no single-line inline form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("property '{0}' holds a nested value and cannot be turned into an inline field")]
pub struct NestedValue(pub String);

/// Move `name` from frontmatter into an inline field line at the end of the
/// trailing block.
///
/// Returns the metadata operation that removes the property, or `None` when
/// the frontmatter does not hold it.
pub fn turn_inline(
    doc: &mut Document,
    frontmatter: &Frontmatter,
    name: &str,
) -> Result<Option<MetadataOp>, NestedValue> {
    let Some(key) = find_key(frontmatter, name) else {
        return Ok(None);
    };
    let value = frontmatter.get(key).map(inline_value).unwrap_or_default();
    let Some(value) = value else {
        return Err(NestedValue(key.to_string()));
    };

    let line = if value.is_empty() { format!("{key}::") } else { format!("{key}:: {value}") };
    doc.append_to_trailing(&line);
    Ok(Some(MetadataOp::Remove(key.to_string())))
}

/// Collect every `name:: value` line from the body and trailing block into a
/// frontmatter value, removing the lines.
///
/// One occurrence becomes a scalar, several a list. A trailing block left
/// with nothing but its fences is dropped.
pub fn turn_frontmatter(doc: &mut Document, name: &str) -> Option<MetadataOp> {
    let re = field_line_regex(name)?;

    let mut values = take_fields(&re, doc.body_mut());
    let from_trailing = take_fields(&re, doc.trailing_mut());
    if !from_trailing.is_empty() && doc.is_trailing_blank() {
        doc.clear_trailing();
    }
    values.extend(from_trailing);

    let value = match values.len() {
        0 => return None,
        1 => typed_value(&values[0]),
        _ => Value::Sequence(values.iter().map(|v| typed_value(v)).collect()),
    };
    Some(MetadataOp::Set { key: name.to_string(), value })
}

/// Exact key match first, then case-insensitive.
fn find_key<'a>(frontmatter: &'a Frontmatter, name: &str) -> Option<&'a str> {
    if frontmatter.contains_key(name) {
        return frontmatter.keys().find(|key| *key == name);
    }
    let lowered = name.to_lowercase();
    frontmatter.keys().find(|key| key.to_lowercase() == lowered)
}

/// Single-line rendering of a scalar or list of scalars.
fn inline_value(value: &Value) -> Option<String> {
    match value {
        Value::Sequence(items) => {
            let parts: Option<Vec<String>> = items.iter().map(scalar_text).collect();
            parts.map(|parts| parts.join(", "))
        }
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn field_line_regex(name: &str) -> Option<Regex> {
    let pattern = format!(
        r"(?mi)^[ \t]*{}::[ \t]*([^\r\n]*?)[ \t]*(?:\r?\n|$)",
        regex::escape(name)
    );
    Regex::new(&pattern).ok()
}

fn take_fields(re: &Regex, text: &mut String) -> Vec<String> {
    let mut values = Vec::new();
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;

    for cap in re.captures_iter(text) {
        let (Some(line), Some(value)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        kept.push_str(&text[cursor..line.start()]);
        cursor = line.end();
        if !value.as_str().is_empty() {
            values.push(value.as_str().to_string());
        }
    }

    if cursor > 0 {
        kept.push_str(&text[cursor..]);
        *text = kept;
    }
    values
}

/// Numbers and booleans are typed, everything else stays a string.
pub fn typed_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(Number::from(int));
    }
    if let Ok(float) = raw.parse::<f64>()
        && float.is_finite()
    {
        return Value::Number(Number::from(float));
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
