//! Document segmentation.
//!
//! Every document is treated as three regions: a leading frontmatter block,
//! a free-form body and a trailing block owned by this tool that holds
//! relationship lists and inline fields.

mod segment;

pub use segment::{Document, FENCE};
