//! Device-local key-value storage for the persisted stores.
//!
//! Each store owns one namespace and writes its whole snapshot as a single
//! JSON blob.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

pub const AUTH_NAMESPACE: &str = "auth-storage";
pub const NOTIFICATIONS_NAMESPACE: &str = "notifications-storage";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error for {namespace}: {source}")]
    Io {
        namespace: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed blob in {namespace}: {source}")]
    Json {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Raw blob stored under `namespace`, if any
    async fn get(&self, namespace: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `namespace`
    async fn set(&self, namespace: &str, value: String) -> Result<()>;
}

/// Read and decode a namespace
pub async fn load<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    namespace: &str,
) -> Result<Option<T>> {
    let Some(raw) = storage.get(namespace).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Json {
            namespace: namespace.to_string(),
            source,
        })
}

/// Encode and write a namespace in full
pub async fn save<T: Serialize + Sync>(
    storage: &dyn KeyValueStorage,
    namespace: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Json {
        namespace: namespace.to_string(),
        source,
    })?;
    storage.set(namespace, raw).await
}

/// One `<namespace>.json` file per namespace under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{}.json", namespace))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, namespace: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(namespace)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                namespace: namespace.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, namespace: &str, value: String) -> Result<()> {
        let io_error = |source| StorageError::Io {
            namespace: namespace.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_error)?;
        let path = self.path(namespace);
        // Readers only ever see a complete blob: write aside, then swap in
        let staging = self.dir.join(format!("{}.json.tmp", namespace));
        tokio::fs::write(&staging, value).await.map_err(io_error)?;
        tokio::fs::rename(&staging, &path).await.map_err(io_error)?;

        debug!("Persisted {} to {}", namespace, path.display());
        Ok(())
    }
}

/// Process-local storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, namespace: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(blobs.get(namespace).cloned())
    }

    async fn set(&self, namespace: &str, value: String) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        blobs.insert(namespace.to_string(), value);
        Ok(())
    }
}
