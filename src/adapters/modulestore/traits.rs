//! Content store trait definition
//!
//! The `ContentStore` trait is the seam between coursegraph and whatever
//! holds the course content trees. Exports only ever read through it.

use crate::domain::{ContentBlock, CourseKey, CourseSummary, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to a hierarchical content store
///
/// # Example
///
/// ```no_run
/// use coursegraph::adapters::modulestore::{ContentStore, JsonContentStore};
///
/// # async fn example() -> coursegraph::domain::Result<()> {
/// let store = JsonContentStore::open("/srv/course_exports").await?;
/// for course in store.course_summaries().await? {
///     let items = store.items(&course.id).await?;
///     println!("{}: {} blocks", course.id, items.len());
///     store.clear_request_cache();
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short name of the backend, used in logs
    fn backend_name(&self) -> &'static str;

    /// List every course in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a course document is
    /// malformed.
    async fn course_summaries(&self) -> Result<Vec<CourseSummary>>;

    /// All blocks of a course as a flat list, in document order
    ///
    /// Results are memoized in the request cache until
    /// [`ContentStore::clear_request_cache`] is called.
    ///
    /// # Errors
    ///
    /// Returns `ModuleStoreError::CourseNotFound` for an unknown course key.
    async fn items(&self, course_key: &CourseKey) -> Result<Arc<Vec<ContentBlock>>>;

    /// Drop everything memoized since the last clear
    fn clear_request_cache(&self);
}
