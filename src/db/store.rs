//! Collection store: a small persistent key-value backend.
//!
//! Records are grouped into named collections and addressed by key. The
//! `FileStore` backend keeps one directory per collection and one
//! `<key>.json` file per record. Writes land in a temp file first and are
//! renamed into place, so readers never see a half-written record.
//!
//! The store makes no cross-key guarantees. A read followed by a write is two
//! separate operations; callers that probe before writing can race.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record {collection}/{key} not found")]
    NotFound { collection: String, key: String },

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("invalid record: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque collection store consumed by the location registry.
///
/// Records are raw JSON documents; decoding is the caller's job.
#[async_trait]
pub trait CollectionStore: Send + Sync + std::fmt::Debug {
    async fn read(&self, collection: &str, key: &str) -> Result<String, StoreError>;

    async fn write(
        &self,
        collection: &str,
        key: &str,
        record: &serde_json::Value,
    ) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// All records of a collection, ordered by key. A collection that was
    /// never written is empty.
    async fn read_all(&self, collection: &str) -> Result<Vec<String>, StoreError>;
}

/// JSON-files-on-disk store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // Serializes writers against each other and against directory scans.
    lock: RwLock<()>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!("Collection store opened at {}", root.display());
        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_segment(collection)?;
        Ok(self.root.join(collection))
    }

    fn record_path(&self, collection: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_segment(key)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{}.{}", key, RECORD_EXTENSION)))
    }
}

/// Keys and collection names become file names; reject anything that could
/// escape the collection directory.
fn validate_segment(segment: &str) -> Result<(), StoreError> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidKey(segment.to_string()));
    }
    Ok(())
}

#[async_trait]
impl CollectionStore for FileStore {
    async fn read(&self, collection: &str, key: &str) -> Result<String, StoreError> {
        let path = self.record_path(collection, key)?;
        let _guard = self.lock.read().await;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        record: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let dir = self.collection_dir(collection)?;
        let path = self.record_path(collection, key)?;
        let tmp = path.with_extension(TEMP_EXTENSION);
        let body = serde_json::to_vec_pretty(record)?;

        let _guard = self.lock.write().await;
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let path = self.record_path(collection, key)?;
        let _guard = self.lock.write().await;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_all(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.collection_dir(collection)?;
        let _guard = self.lock.read().await;

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            records.push(tokio::fs::read_to_string(&path).await?);
        }
        Ok(records)
    }
}
