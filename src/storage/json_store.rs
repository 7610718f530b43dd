//! Filesystem-backed item store
//!
//! One JSON file per item, named `<ItemID>.json`, pretty-printed UTF-8 with
//! non-ASCII characters preserved literally. Writes overwrite unconditionally
//! (last-writer-wins).

use crate::crawler::ItemRecord;
use crate::storage::StorageError;
use std::path::{Path, PathBuf};

/// Durable store writing one JSON document per item record
#[derive(Debug)]
pub struct ItemStore {
    root: PathBuf,
}

impl ItemStore {
    /// Opens the store rooted at `root`, creating the directory if absent
    ///
    /// The root is canonicalized so reports show the resolved path. Failure
    /// here is fatal to the run and happens before any network activity.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();

        std::fs::create_dir_all(root).map_err(|source| StorageError::CreateDir {
            path: root.to_path_buf(),
            source,
        })?;

        let root = root
            .canonicalize()
            .map_err(|source| StorageError::Resolve {
                path: root.to_path_buf(),
                source,
            })?;

        Ok(Self { root })
    }

    /// The resolved directory item files are written into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file a given item ID persists to
    pub fn item_path(&self, item_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", item_id))
    }

    /// Writes one item record to its file, overwriting any previous version
    ///
    /// Returns the path written. Failures carry the item ID so they stay
    /// attributable when many writes are in flight.
    pub async fn persist(&self, item: &ItemRecord) -> Result<PathBuf, StorageError> {
        let path = self.item_path(&item.item_id);

        let json = serde_json::to_string_pretty(item).map_err(|source| {
            StorageError::Serialize {
                item_id: item.item_id.clone(),
                source,
            }
        })?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| StorageError::Write {
                item_id: item.item_id.clone(),
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
