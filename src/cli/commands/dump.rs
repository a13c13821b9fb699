//! Dump command implementation
//!
//! This module implements the `dump-to-neo4j` command: clear the csv
//! directory, dump every course, print the Neo4j import command and
//! optionally upload the files.

use super::{load_command_config, report_failure, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::adapters::modulestore::create_content_store;
use crate::adapters::storage::{create_object_store, upload_directory};
use crate::config::CourseGraphConfig;
use crate::core::export::{CsvDirectory, ExportCoordinator};
use crate::core::import_command::{BulkImportCommand, ImportOptions};
use clap::Args;

/// Arguments for the dump-to-neo4j command
#[derive(Args, Debug, Default)]
pub struct DumpArgs {
    /// Directory receiving the csv files
    #[arg(long)]
    pub csv_dir: Option<String>,

    /// Neo4j installation the import command runs from
    #[arg(long)]
    pub neo4j_root: Option<String>,

    /// Content store directory
    #[arg(long)]
    pub store: Option<String>,

    /// Keep csv files from earlier runs and append to them
    #[arg(long)]
    pub no_clear: bool,

    /// Upload the csv files once the dump completes
    #[arg(long)]
    pub upload: bool,
}

impl DumpArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply_overrides(&self, config: &mut CourseGraphConfig) {
        if let Some(csv_dir) = &self.csv_dir {
            tracing::info!(csv_dir = %csv_dir, "Overriding csv directory from CLI");
            config.export.csv_dir = csv_dir.clone();
        }
        if let Some(root) = &self.neo4j_root {
            tracing::info!(neo4j_root = %root, "Overriding Neo4j root from CLI");
            config.neo4j.root = root.clone();
        }
        if let Some(store) = &self.store {
            tracing::info!(store = %store, "Overriding content store path from CLI");
            config.store.path = store.clone();
        }
        if self.no_clear {
            config.export.clear_csv_dir = false;
        }
        if self.upload {
            config.upload.enabled = true;
        }
    }

    /// Execute the dump-to-neo4j command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting dump-to-neo4j command");

        let mut config = match load_command_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let store = match create_content_store(&config.store).await {
            Ok(store) => store,
            Err(e) => return Ok(report_failure(&e, "Failed to open content store")),
        };

        let csv_dir = match CsvDirectory::new(&config.export.csv_dir) {
            Ok(dir) => dir,
            Err(e) => return Ok(report_failure(&e, "Failed to prepare csv directory")),
        };

        if config.export.clear_csv_dir {
            match csv_dir.clear() {
                Ok(removed) => tracing::info!(
                    removed = removed,
                    csv_dir = %csv_dir.path().display(),
                    "Cleared csv directory"
                ),
                Err(e) => return Ok(report_failure(&e, "Failed to clear csv directory")),
            }
        }

        println!("🚀 Dumping courses to {}", csv_dir.path().display());
        println!();

        let mut coordinator = ExportCoordinator::new(store, csv_dir);
        let summary = match coordinator.dump_to_csv().await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_failure(&e, "Dump failed")),
        };
        summary.log_summary();

        println!("📊 Dump Summary:");
        println!("  Courses: {}", summary.total_courses);
        println!("  Blocks: {}", summary.total_blocks);
        println!("  Block Types: {}", summary.block_type_count());
        println!("  Relationships: {}", summary.total_relationships);
        println!("  Files: {}", summary.files.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let command = match BulkImportCommand::for_directory(
            &config.neo4j.root,
            coordinator.csv_dir(),
            ImportOptions::from(&config.neo4j),
        ) {
            Ok(command) => command,
            Err(e) => return Ok(report_failure(&e, "Failed to generate import command")),
        };
        tracing::info!(command = %command, "Generated Neo4j import command");
        println!("Neo4j import command:");
        println!("{command}");
        println!();

        if config.upload.enabled {
            let object_store = match create_object_store(&config.upload).await {
                Ok(store) => store,
                Err(e) => return Ok(report_failure(&e, "Failed to configure upload")),
            };
            match upload_directory(object_store.as_ref(), coordinator.csv_dir().path()).await {
                Ok(keys) => {
                    println!("☁️  Uploaded {} files to {}", keys.len(), object_store.describe());
                }
                Err(e) => return Ok(report_failure(&e, "Upload failed")),
            }
        }

        Ok(EXIT_SUCCESS)
    }
}
