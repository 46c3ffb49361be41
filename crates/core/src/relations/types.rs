//! Data structures for relationship sub-blocks.

use std::ops::Range;

/// A named list of links found in the trailing block:
///
/// ```markdown
/// related:
/// - [[Note A]]
/// - [[Note B]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipBlock {
    /// Byte range of the header line and all link lines, including the
    /// final line break.
    pub span: Range<usize>,
    /// Byte range of the property name inside the header line.
    pub name_span: Range<usize>,
    /// Property name as written.
    pub name: String,
    /// Link references in order, brackets included (`"[[Note A]]"`).
    pub links: Vec<String>,
}

/// A list of links whose header has no usable property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedHeader {
    /// Header text before the colon.
    pub header: String,
    /// Byte offset of the header line in the scanned text.
    pub offset: usize,
}

/// Everything found while scanning a trailing block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipScan {
    pub blocks: Vec<RelationshipBlock>,
    pub malformed: Vec<MalformedHeader>,
}

/// A list value to store in frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipWrite {
    pub key: String,
    pub links: Vec<String>,
}

/// Result of reconciling a trailing block with pending property edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Trailing text after header renames and block removals.
    pub trailing: String,
    /// Frontmatter writes, in block order.
    pub writes: Vec<RelationshipWrite>,
    /// Blocks skipped because their header could not be read.
    pub malformed: Vec<MalformedHeader>,
    pub removed_blocks: usize,
    pub renamed_blocks: usize,
}
