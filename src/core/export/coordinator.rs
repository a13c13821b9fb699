//! Export coordinator - main orchestrator for the dump
//!
//! Walks the content store one course at a time and appends each course's
//! blocks and edges to the csv directory.

use super::serializer::{relationships_from_items, ModuleStoreSerializer};
use super::summary::ExportSummary;
use super::writer::CsvDirectory;
use crate::adapters::modulestore::ContentStore;
use crate::domain::{CourseKey, Result};
use crate::log_course_progress;
use std::sync::Arc;
use std::time::Instant;

/// Rows written for a single course
#[derive(Debug, Default)]
struct CourseDumpStats {
    blocks: usize,
    relationships: usize,
}

/// Export coordinator
pub struct ExportCoordinator {
    store: Arc<dyn ContentStore>,
    csv_dir: CsvDirectory,
    serializer: ModuleStoreSerializer,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(store: Arc<dyn ContentStore>, csv_dir: CsvDirectory) -> Self {
        Self {
            store,
            csv_dir,
            serializer: ModuleStoreSerializer::new(),
        }
    }

    /// Output directory
    pub fn csv_dir(&self) -> &CsvDirectory {
        &self.csv_dir
    }

    /// Dump every course in the store to csv
    ///
    /// Courses are processed in store order. The store's request cache is
    /// cleared after each course. The first error aborts the dump; files
    /// written up to that point are left in place.
    pub async fn dump_to_csv(&mut self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        let courses = self.store.course_summaries().await?;
        let total = courses.len();
        tracing::info!(
            backend = self.store.backend_name(),
            course_count = total,
            csv_dir = %self.csv_dir.path().display(),
            "Starting dump to csv"
        );

        for (index, course) in courses.iter().enumerate() {
            log_course_progress!(index + 1, total, course.id);

            let stats = self.dump_course_items_to_csv(&course.id, &mut summary).await?;
            self.store.clear_request_cache();

            summary.total_courses += 1;
            tracing::debug!(
                course_key = %course.id,
                blocks = stats.blocks,
                relationships = stats.relationships,
                "Course dumped"
            );
        }

        summary.files = self.csv_dir.csv_files()?;
        Ok(summary.with_duration(start_time.elapsed()))
    }

    async fn dump_course_items_to_csv(
        &mut self,
        course_key: &CourseKey,
        summary: &mut ExportSummary,
    ) -> Result<CourseDumpStats> {
        let items = self.store.items(course_key).await?;

        let blocks_by_type = ModuleStoreSerializer::serialize_items(&items, course_key);
        let written = self
            .csv_dir
            .dump_blocks(&mut self.serializer, &blocks_by_type)?;

        let mut stats = CourseDumpStats::default();
        for (block_type, count) in &written {
            summary.add_blocks(block_type, *count);
            stats.blocks += count;
        }

        let relationships = relationships_from_items(&items);
        stats.relationships = self.csv_dir.dump_relationships(&relationships)?;
        summary.add_relationships(stats.relationships);

        Ok(stats)
    }
}
