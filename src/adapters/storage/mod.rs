//! Object storage upload
//!
//! Generated csv files can be pushed to a bucket, one object per file, keyed
//! by file name.

pub mod http;
pub mod local;
pub mod traits;

pub use http::HttpObjectStore;
pub use local::LocalObjectStore;
pub use traits::ObjectStore;

use crate::config::{UploadBackend, UploadConfig};
use crate::domain::{CourseGraphError, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Create an object store from configuration
///
/// # Errors
///
/// Returns a configuration error when the upload settings are incomplete.
pub async fn create_object_store(config: &UploadConfig) -> Result<Arc<dyn ObjectStore>> {
    config
        .validate_target()
        .map_err(CourseGraphError::Configuration)?;

    match config.backend {
        UploadBackend::Local => {
            let root = config.path.as_deref().unwrap_or_default();
            let store = LocalObjectStore::new(root, &config.bucket).await?;
            Ok(Arc::new(store) as Arc<dyn ObjectStore>)
        }
        UploadBackend::Http => {
            let endpoint = config.endpoint.as_deref().unwrap_or_default();
            let store = HttpObjectStore::new(
                endpoint,
                &config.bucket,
                config.token.clone(),
                Duration::from_secs(config.timeout_seconds),
            )?;
            Ok(Arc::new(store) as Arc<dyn ObjectStore>)
        }
    }
}

/// Upload every regular file in `dir`, keyed by file name
///
/// Files are uploaded in name order. The first failure aborts the upload.
///
/// # Returns
///
/// The uploaded keys.
pub async fn upload_directory(store: &dyn ObjectStore, dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        CourseGraphError::Io(format!("Failed to read {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push((name, entry.path())),
            Err(name) => tracing::warn!(file = ?name, "Skipping file with non UTF-8 name"),
        }
    }
    files.sort();

    tracing::info!(
        destination = %store.describe(),
        file_count = files.len(),
        "Uploading csv files"
    );

    let mut uploaded = Vec::with_capacity(files.len());
    for (key, path) in files {
        let body = tokio::fs::read(&path).await?;
        store.put_object(&key, body).await?;
        uploaded.push(key);
    }

    Ok(uploaded)
}
