//! Splitting document text into leading block, body and trailing block.

/// Line content that opens and closes a metadata block.
pub const FENCE: &str = "---";

/// A document split into its three regions.
///
/// `leading + body + trailing` always reproduces the text the document was
/// parsed from. When the text has no trailing block an empty placeholder
/// fence stands in for it; the placeholder is dropped again on
/// [`Document::assemble`] unless something was written into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    leading: String,
    body: String,
    trailing: String,
    trailing_closed: bool,
    placeholder: Option<String>,
}

impl Document {
    /// Segment raw document text.
    pub fn parse(text: &str) -> Self {
        let leading_len = leading_block_len(text).unwrap_or(0);
        let (leading, rest) = text.split_at(leading_len);

        match opening_fence(rest) {
            Some((start, closed)) => Self {
                leading: leading.to_string(),
                body: rest[..start].to_string(),
                trailing: rest[start..].to_string(),
                trailing_closed: closed,
                placeholder: None,
            },
            None => {
                let placeholder = placeholder_after(rest);
                Self {
                    leading: leading.to_string(),
                    body: rest.to_string(),
                    trailing: placeholder.clone(),
                    trailing_closed: false,
                    placeholder: Some(placeholder),
                }
            }
        }
    }

    /// The leading block including both fences, or `""` when absent.
    pub fn leading(&self) -> &str {
        &self.leading
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The trailing block from its opening fence to end of text.
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    pub fn has_leading(&self) -> bool {
        !self.leading.is_empty()
    }

    /// Whether the text carried a trailing block of its own.
    pub fn has_trailing(&self) -> bool {
        self.placeholder.is_none()
    }

    /// Whether the trailing block ends with its own closing fence.
    pub fn is_trailing_closed(&self) -> bool {
        self.trailing_closed
    }

    pub fn set_leading(&mut self, leading: String) {
        self.leading = leading;
    }

    pub fn body_mut(&mut self) -> &mut String {
        &mut self.body
    }

    pub fn trailing_mut(&mut self) -> &mut String {
        &mut self.trailing
    }

    /// Whether the trailing block holds nothing but fences and blank lines.
    pub fn is_trailing_blank(&self) -> bool {
        self.trailing.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line == FENCE
        })
    }

    /// Drop the trailing block. A placeholder takes its place, as for text
    /// that never had one.
    pub fn clear_trailing(&mut self) {
        let placeholder = placeholder_after(&self.body);
        self.trailing = placeholder.clone();
        self.trailing_closed = false;
        self.placeholder = Some(placeholder);
    }

    /// Append one line to the trailing block, keeping a closing fence last.
    pub fn append_to_trailing(&mut self, line: &str) {
        if self.trailing_closed
            && let Some(&close) = fence_offsets(&self.trailing).last()
        {
            self.trailing.insert_str(close, &format!("{line}\n"));
            return;
        }

        if !self.trailing.ends_with('\n') {
            self.trailing.push('\n');
        }
        self.trailing.push_str(line);
        self.trailing.push('\n');
    }

    /// Re-assemble the document text.
    pub fn assemble(&self) -> String {
        let untouched_placeholder = self.placeholder.as_deref() == Some(self.trailing.as_str());

        let mut text = String::with_capacity(
            self.leading.len() + self.body.len() + self.trailing.len(),
        );
        text.push_str(&self.leading);
        text.push_str(&self.body);
        if !untouched_placeholder {
            text.push_str(&self.trailing);
        }
        text
    }
}

/// An empty trailing block to follow `body`.
fn placeholder_after(body: &str) -> String {
    if body.ends_with('\n') {
        format!("{FENCE}\n")
    } else {
        format!("\n{FENCE}\n")
    }
}

/// Length of the fenced block anchored at the start of `text`, ending right
/// after the closing fence token.
fn leading_block_len(text: &str) -> Option<usize> {
    let first_line_end = text.find('\n')?;
    if text[..first_line_end].trim_end_matches('\r') != FENCE {
        return None;
    }

    let mut offset = first_line_end + 1;
    for line in text[offset..].split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == FENCE {
            return Some(offset + FENCE.len());
        }
        offset += line.len();
    }
    None
}

/// Byte offsets of every fence line that follows a line break.
fn fence_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if offset > 0 && line.trim_end_matches(['\n', '\r']) == FENCE {
            offsets.push(offset);
        }
        offset += line.len();
    }
    offsets
}

/// Locate the trailing block's opening fence in the text after the leading
/// block. The last fence line opens the block, unless only whitespace
/// follows it and an earlier fence exists: then it is the closing fence.
fn opening_fence(rest: &str) -> Option<(usize, bool)> {
    let fences = fence_offsets(rest);
    let (&last, earlier) = fences.split_last()?;
    let after_last = &rest[last + FENCE.len()..];

    match earlier.last() {
        Some(&opening) if after_last.trim().is_empty() => Some((opening, true)),
        _ => Some((last, false)),
    }
}
