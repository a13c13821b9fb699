//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::BlockType;
use std::collections::BTreeMap;
use std::time::Duration;

/// Summary of a dump to csv
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of courses dumped
    pub total_courses: usize,

    /// Number of blocks written, all types
    pub total_blocks: usize,

    /// Number of parent/child edges written
    pub total_relationships: usize,

    /// Blocks written per block type
    pub blocks_by_type: BTreeMap<String, usize>,

    /// Csv files present in the output directory after the dump
    pub files: Vec<String>,

    /// Duration of the dump
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record rows written for a block type
    pub fn add_blocks(&mut self, block_type: &BlockType, count: usize) {
        *self
            .blocks_by_type
            .entry(block_type.to_string())
            .or_default() += count;
        self.total_blocks += count;
    }

    /// Record edges written
    pub fn add_relationships(&mut self, count: usize) {
        self.total_relationships += count;
    }

    /// Number of distinct block types seen
    pub fn block_type_count(&self) -> usize {
        self.blocks_by_type.len()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_courses = self.total_courses,
            total_blocks = self.total_blocks,
            total_relationships = self.total_relationships,
            block_types = self.block_type_count(),
            files = self.files.len(),
            duration_secs = self.duration.as_secs(),
            "Dump completed"
        );

        for (block_type, count) in &self.blocks_by_type {
            tracing::debug!(block_type = %block_type, count = count, "Blocks written");
        }
    }
}
