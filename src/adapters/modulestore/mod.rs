//! Content store (modulestore) adapter
//!
//! The content store is an external collaborator; coursegraph reaches it
//! only through the [`ContentStore`] trait. The bundled backend reads course
//! documents from a directory of JSON files.

pub mod json;
pub mod traits;

pub use json::JsonContentStore;
pub use traits::ContentStore;

use crate::config::StoreConfig;
use crate::domain::{CourseGraphError, Result};
use std::sync::Arc;

/// Create a content store from configuration
///
/// # Errors
///
/// Returns a configuration error for an unsupported backend, or the
/// backend's own error if the store cannot be opened.
pub async fn create_content_store(config: &StoreConfig) -> Result<Arc<dyn ContentStore>> {
    match config.backend.to_lowercase().as_str() {
        "json" => {
            tracing::info!(path = %config.path, "Opening JSON content store");
            let store = JsonContentStore::open(&config.path).await?;
            Ok(Arc::new(store) as Arc<dyn ContentStore>)
        }
        other => Err(CourseGraphError::Configuration(format!(
            "Unsupported store backend: {other}. Supported backends: json"
        ))),
    }
}
