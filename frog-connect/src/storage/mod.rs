//! Persistent key-value storage for connection state.
//!
//! - [`Storage`] — Backend trait over JSON values.
//! - [`MemoryStorage`] / [`FileStorage`] — In-memory and local-persistent
//!   backends.
//! - [`StorageSettings`] — Declarative backend selection plus the
//!   namespace key every persisted entry is scoped under.
//! - [`NamespacedStorage`] — Typed handle produced by
//!   [`StorageSettings::open`].

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Namespace key the stock configuration persists under.
pub const DEFAULT_STORAGE_KEY: &str = "frog";

/// A key-value persistence backend.
#[async_trait]
pub trait Storage: Debug + Send + Sync {
    /// Retrieves the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, Error>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), Error>;

    /// Deletes the value stored under `key`, if any.
    async fn del(&self, key: &str) -> Result<(), Error>;
}

/// Which persistence backend a configuration binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// JSON document on local disk. The local-persistent default.
    File,
    /// Process-local map; nothing survives a restart.
    Memory,
}

const fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_owned()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("frog-store.json")
}

/// Declarative storage binding: one backend, one namespace key.
///
/// Settings are plain data so configurations stay comparable and free of
/// I/O; [`StorageSettings::open`] constructs the live backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Selected backend (default: [`StorageBackend::File`]).
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Namespace prefix for every persisted entry (default: `"frog"`).
    #[serde(default = "default_key")]
    pub key: String,
    /// Document path for the file backend (default: `frog-store.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            key: default_key(),
            path: None,
        }
    }
}

impl StorageSettings {
    /// In-memory storage under the default namespace key.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            key: default_key(),
            path: None,
        }
    }

    /// File-backed storage at `path` under the default namespace key.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            key: default_key(),
            path: Some(path.into()),
        }
    }

    /// Replaces the namespace key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Opens the configured backend and returns a namespaced handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the file backend's document exists but cannot
    /// be read or parsed.
    pub async fn open(&self) -> Result<NamespacedStorage, Error> {
        let backend: Arc<dyn Storage> = match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => {
                let path = self.path.clone().unwrap_or_else(default_store_path);
                Arc::new(FileStorage::open(path).await?)
            }
        };
        Ok(NamespacedStorage::new(backend, self.key.clone()))
    }
}

/// Storage handle that namespaces every key under the configured prefix
/// and (de)serialises values through JSON.
#[derive(Debug, Clone)]
pub struct NamespacedStorage {
    inner: Arc<dyn Storage>,
    key: String,
}

impl NamespacedStorage {
    /// Wraps a backend with a namespace key.
    pub fn new(inner: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            inner,
            key: key.into(),
        }
    }

    /// The namespace prefix.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn scoped(&self, suffix: &str) -> String {
        format!("{}.{suffix}", self.key)
    }

    /// Retrieves and deserialises the value stored under `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value does not
    /// deserialise into `T`.
    pub async fn get<T>(&self, suffix: &str) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        match self.inner.get(&self.scoped(suffix)).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| Error::storage_with(format!("failed to decode entry '{suffix}'"), e)),
            None => Ok(None),
        }
    }

    /// Serialises and stores `value` under `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the backend write fails.
    pub async fn set<T>(&self, suffix: &str, value: &T) -> Result<(), Error>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::storage_with(format!("failed to encode entry '{suffix}'"), e))?;
        self.inner.set(&self.scoped(suffix), value).await
    }

    /// Deletes the value stored under `suffix`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub async fn del(&self, suffix: &str) -> Result<(), Error> {
        self.inner.del(&self.scoped(suffix)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_settings_bind_the_local_persistent_backend_under_frog() {
        let settings = StorageSettings::default();
        assert_eq!(settings.backend, StorageBackend::File);
        assert_eq!(settings.key, DEFAULT_STORAGE_KEY);
        assert!(settings.path.is_none());
    }

    #[tokio::test]
    async fn entries_are_namespaced_under_the_configured_key() {
        let backend = Arc::new(MemoryStorage::new());
        let storage = NamespacedStorage::new(Arc::clone(&backend) as Arc<dyn Storage>, "frog");

        storage
            .set("recent-connector", &"walletconnect")
            .await
            .expect("set");

        let raw = backend
            .get("frog.recent-connector")
            .await
            .expect("backend get");
        assert_eq!(raw, Some(serde_json::json!("walletconnect")));

        let value: Option<String> = storage.get("recent-connector").await.expect("get");
        assert_eq!(value.as_deref(), Some("walletconnect"));
    }

    #[tokio::test]
    async fn memory_settings_open_and_round_trip() {
        let storage = StorageSettings::memory().open().await.expect("open");
        assert_eq!(storage.key(), "frog");

        storage.set("session", &42_u32).await.expect("set");
        assert_eq!(storage.get::<u32>("session").await.expect("get"), Some(42));

        storage.del("session").await.expect("del");
        assert_eq!(storage.get::<u32>("session").await.expect("get"), None);
    }
}
