//! Storage module for persisting item records
//!
//! Each item is written as one self-describing JSON document named by its
//! item ID. Files are independent, so concurrent writes for distinct items
//! never contend and need no locking.

mod json_store;

pub use json_store::ItemStore;

use std::path::PathBuf;
use thiserror::Error;

/// Storage-specific errors
///
/// Every variant names the item or path it belongs to, so a single failed
/// write is attributable without aborting sibling writes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to resolve output directory {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize item {item_id}: {source}")]
    Serialize {
        item_id: String,
        source: serde_json::Error,
    },

    #[error("Failed to write item {item_id} to {}: {source}", path.display())]
    Write {
        item_id: String,
        path: PathBuf,
        source: std::io::Error,
    },
}
