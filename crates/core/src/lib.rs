//! Batch editing of markdown metadata.
//!
//! A document is split into a leading frontmatter block, a body and a
//! trailing block that holds relationship lists. An [`edits::EditSet`]
//! describes property and tag edits; [`wrangler::process`] applies it to a
//! set of documents through a [`store::DocumentStore`] host.

pub mod config;
pub mod document;
pub mod edits;
pub mod frontmatter;
pub mod inline_fields;
pub mod relations;
pub mod store;
pub mod tags;
pub mod vault;
pub mod wrangler;

pub use document::Document;
pub use edits::{EditSet, Options, PropertyAction, TagAction, UserAction};
pub use store::{DocumentRecord, DocumentStore, FileStore, MemoryStore, StoreError};
pub use wrangler::{
    BatchReport, Discovery, DocumentOutcome, OutcomeStatus, ProcessError, discover, process,
};
