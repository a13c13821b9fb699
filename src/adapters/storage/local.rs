//! Local directory object store
//!
//! Mirrors a bucket as `{root}/{bucket}/{key}`. Useful for staging csv sets
//! on shared volumes and for exercising the upload path without a network.

use super::traits::{validate_key, ObjectStore};
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Object store backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    bucket_dir: PathBuf,
}

impl LocalObjectStore {
    /// Create the store, making the bucket directory if needed
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConnectionFailed` if the directory cannot be
    /// created.
    pub async fn new(root: impl AsRef<Path>, bucket: &str) -> Result<Self> {
        validate_key(bucket)?;
        let bucket_dir = root.as_ref().join(bucket);
        tokio::fs::create_dir_all(&bucket_dir).await.map_err(|e| {
            StorageError::ConnectionFailed(format!("{}: {}", bucket_dir.display(), e))
        })?;
        Ok(Self { bucket_dir })
    }

    /// Sorted keys currently in the bucket
    pub async fn list_keys(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.bucket_dir)
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?
        {
            if let Some(name) = entry.file_name().to_str() {
                keys.push(name.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn describe(&self) -> String {
        format!("file://{}", self.bucket_dir.display())
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        validate_key(key)?;
        let path = self.bucket_dir.join(key);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StorageError::UploadFailed {
                key: key.to_string(),
                status: 0,
                message: e.to_string(),
            })?;
        Ok(())
    }
}
