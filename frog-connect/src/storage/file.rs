//! Local-persistent storage backend.
//!
//! Entries live in a single JSON document on disk, the closest
//! equivalent to the browser-local store the stock setup persists to.
//! Writes go through a temporary file and a rename so a crash mid-write
//! leaves the previous document intact.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Storage;
use crate::error::Error;

/// JSON-document storage persisted to local disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl FileStorage {
    /// Opens the document at `path`, creating an empty store if the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::storage_with(format!("failed to parse store '{}'", path.display()), e)
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(Error::storage_with(
                    format!("failed to read store '{}'", path.display()),
                    e,
                ));
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &HashMap<String, serde_json::Value>) -> Result<(), Error> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| Error::storage_with("failed to encode store", e))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            Error::storage_with(format!("failed to write store '{}'", tmp.display()), e)
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            Error::storage_with(format!("failed to replace store '{}'", self.path.display()), e)
        })
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), Error> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_owned(), value);
        self.persist(&entries).await
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}
