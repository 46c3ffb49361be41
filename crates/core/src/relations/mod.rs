//! Relationship lists in the trailing block.
//!
//! A relationship sub-block is a header line naming a property followed by
//! `- [[link]]` lines. Syncing copies each list into frontmatter and applies
//! pending renames and deletions to the block text.

pub mod detector;
pub mod types;
pub mod updater;

pub use detector::{find_blocks, is_list_name};
pub use types::{
    MalformedHeader, RelationshipBlock, RelationshipScan, RelationshipWrite, SyncOutcome,
};
pub use updater::{apply_replacements, sync_relationships};
