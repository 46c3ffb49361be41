//! Vault file discovery and change detection.

pub mod hasher;
pub mod walker;

pub use hasher::{content_hash, content_hash_str};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};
