//! JSON document content store
//!
//! Each course lives in its own `*.json` file inside the store directory:
//!
//! ```json
//! {
//!   "id": "course-v1:edX+DemoX+2024",
//!   "display_name": "Demo Course",
//!   "enrollment_start": "2024-01-01T00:00:00Z",
//!   "enrollment_end": "2024-06-30T00:00:00Z",
//!   "blocks": [
//!     {
//!       "location": "block-v1:edX+DemoX+2024+type@course+block@course",
//!       "block_type": "course",
//!       "edited_on": "2024-01-03T10:00:00Z",
//!       "fields": {"display_name": "Demo Course", "self_paced": false},
//!       "children": ["block-v1:edX+DemoX+2024+type@chapter+block@week_1"]
//!     }
//!   ]
//! }
//! ```

use super::traits::ContentStore;
use crate::domain::{
    ContentBlock, CourseGraphError, CourseKey, CourseSummary, ModuleStoreError, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Full course document as stored on disk
#[derive(Debug, Deserialize)]
struct CourseDocument {
    id: CourseKey,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    enrollment_start: Option<DateTime<Utc>>,
    #[serde(default)]
    enrollment_end: Option<DateTime<Utc>>,
    #[serde(default)]
    blocks: Vec<ContentBlock>,
}

impl CourseDocument {
    fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            enrollment_start: self.enrollment_start,
            enrollment_end: self.enrollment_end,
        }
    }
}

/// Content store backed by a directory of JSON course documents
pub struct JsonContentStore {
    root: PathBuf,
    /// Course key to document path, filled by the first listing
    index: Mutex<HashMap<CourseKey, PathBuf>>,
    /// Request cache of loaded course items
    request_cache: Mutex<HashMap<CourseKey, Arc<Vec<ContentBlock>>>>,
}

impl JsonContentStore {
    /// Open a store directory
    ///
    /// # Errors
    ///
    /// Returns `ModuleStoreError::Unavailable` if the path is not a directory.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&root).await.map_err(|e| {
            ModuleStoreError::Unavailable(format!("{}: {}", root.display(), e))
        })?;
        if !metadata.is_dir() {
            return Err(ModuleStoreError::Unavailable(format!(
                "{} is not a directory",
                root.display()
            ))
            .into());
        }

        tracing::debug!(root = %root.display(), "Opened JSON content store");

        Ok(Self {
            root,
            index: Mutex::new(HashMap::new()),
            request_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of courses currently held in the request cache
    pub fn cached_courses(&self) -> usize {
        lock(&self.request_cache).len()
    }

    /// Sorted paths of every course document in the store
    async fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            ModuleStoreError::Unavailable(format!("{}: {}", self.root.display(), e))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file()
            {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn read_document(path: &Path) -> Result<CourseDocument> {
        let contents = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&contents).map_err(|e| {
            CourseGraphError::from(ModuleStoreError::InvalidDocument {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    async fn path_for(&self, course_key: &CourseKey) -> Result<PathBuf> {
        if let Some(path) = lock(&self.index).get(course_key) {
            return Ok(path.clone());
        }

        // Index is empty or stale: rescan the directory
        self.course_summaries().await?;

        lock(&self.index)
            .get(course_key)
            .cloned()
            .ok_or_else(|| ModuleStoreError::CourseNotFound(course_key.to_string()).into())
    }
}

#[async_trait]
impl ContentStore for JsonContentStore {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn course_summaries(&self) -> Result<Vec<CourseSummary>> {
        let mut summaries = Vec::new();
        let mut index: HashMap<CourseKey, PathBuf> = HashMap::new();

        for path in self.document_paths().await? {
            let document = Self::read_document(&path).await?;
            // First document in path order wins for both summaries and items
            if let Some(kept) = index.get(&document.id) {
                tracing::warn!(
                    course_key = %document.id,
                    kept = %kept.display(),
                    ignored = %path.display(),
                    "Duplicate course document"
                );
                continue;
            }
            index.insert(document.id.clone(), path);
            summaries.push(document.summary());
        }

        *lock(&self.index) = index;
        Ok(summaries)
    }

    async fn items(&self, course_key: &CourseKey) -> Result<Arc<Vec<ContentBlock>>> {
        if let Some(items) = lock(&self.request_cache).get(course_key) {
            return Ok(Arc::clone(items));
        }

        let path = self.path_for(course_key).await?;
        let document = Self::read_document(&path).await?;
        if &document.id != course_key {
            return Err(ModuleStoreError::InvalidDocument {
                path: path.display().to_string(),
                message: format!("expected course {course_key}, found {}", document.id),
            }
            .into());
        }

        let items = Arc::new(document.blocks);
        lock(&self.request_cache).insert(course_key.clone(), Arc::clone(&items));
        Ok(items)
    }

    fn clear_request_cache(&self) {
        lock(&self.request_cache).clear();
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
