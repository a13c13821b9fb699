//! Core business logic for coursegraph.
//!
//! # Modules
//!
//! - [`export`] - Dump of the content store to per-type csv files
//! - [`import_command`] - The `neo4j-import` command for a csv directory
//! - [`html_text`] - Plain-text dump of html blocks
//! - [`courses`] - Course enrollment listing
//!
//! # Export Workflow
//!
//! 1. **Clear**: Remove csv files left by the previous run
//! 2. **Dump**: For each course, serialize its blocks and append them to
//!    one file per block type, and its edges to `relationships.csv`
//! 3. **Command**: Generate the bulk import command for the directory
//! 4. **Upload** (optional): Push every file to object storage
//!
//! # Example
//!
//! ```rust,no_run
//! use coursegraph::adapters::modulestore::create_content_store;
//! use coursegraph::config::load_config;
//! use coursegraph::core::export::{CsvDirectory, ExportCoordinator};
//! use coursegraph::core::import_command::{BulkImportCommand, ImportOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("coursegraph.toml")?;
//! let store = create_content_store(&config.store).await?;
//!
//! let csv_dir = CsvDirectory::new(&config.export.csv_dir)?;
//! csv_dir.clear()?;
//!
//! let mut coordinator = ExportCoordinator::new(store, csv_dir);
//! let summary = coordinator.dump_to_csv().await?;
//! println!("Blocks: {}", summary.total_blocks);
//!
//! let command = BulkImportCommand::for_directory(
//!     &config.neo4j.root,
//!     coordinator.csv_dir(),
//!     ImportOptions::from(&config.neo4j),
//! )?;
//! println!("{command}");
//! # Ok(())
//! # }
//! ```

pub mod courses;
pub mod export;
pub mod html_text;
pub mod import_command;
