//! Dump of the content store to Neo4j import csv files
//!
//! This module provides the core export logic for coursegraph, including:
//! - Block serialization and column selection
//! - The csv output directory
//! - Export coordination and summary

pub mod coordinator;
pub mod serializer;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use serializer::{
    normalize_value, relationships_from_items, BlocksByType, ModuleStoreSerializer,
    Relationship, SerializedBlock,
};
pub use summary::ExportSummary;
pub use writer::{CsvDirectory, RELATIONSHIPS_FILE};
