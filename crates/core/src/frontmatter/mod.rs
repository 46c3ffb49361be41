//! Frontmatter parsing, modification, and serialization.
//!
//! This module provides functionality to:
//! - Parse the leading YAML block of a markdown document into an ordered mapping
//! - Modify it (rename/remove keys, lowercase keys, edit the tag list, set values)
//! - Render it back into a fenced block and splice it into the document

pub mod modifier;
pub mod parser;
pub mod serializer;
pub mod types;

pub use modifier::{apply_op, apply_ops, rewrite_document};
pub use parser::{FrontmatterParseError, parse, parse_block};
pub use serializer::render_block;
pub use types::{Frontmatter, MetadataOp, TAGS_KEY, tag_list};
