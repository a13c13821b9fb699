//! Object storage trait definition

use crate::domain::{Result, StorageError};
use async_trait::async_trait;

/// A bucket that accepts whole objects by key
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Human-readable location of the bucket, used in logs
    fn describe(&self) -> String;

    /// Store `body` under `key`, replacing any existing object
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the key is invalid or the write fails.
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Object keys are plain file names: non-empty, no path separators
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(StorageError::InvalidKey(key.to_string()).into());
    }
    Ok(())
}
