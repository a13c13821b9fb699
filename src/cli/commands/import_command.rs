//! Import command generation
//!
//! This module implements the `import-command` command, which prints the
//! Neo4j bulk import command for a csv directory that already exists.

use super::{load_command_config, report_failure, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::core::export::CsvDirectory;
use crate::core::import_command::{BulkImportCommand, ImportOptions};
use clap::Args;
use std::path::Path;

/// Arguments for the import-command command
#[derive(Args, Debug, Default)]
pub struct ImportCommandArgs {
    /// Directory holding the csv files
    #[arg(long)]
    pub csv_dir: Option<String>,

    /// Neo4j installation the import command runs from
    #[arg(long)]
    pub neo4j_root: Option<String>,
}

impl ImportCommandArgs {
    /// Execute the import-command command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let config = match load_command_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let csv_dir = self.csv_dir.as_deref().unwrap_or(&config.export.csv_dir);
        let neo4j_root = self.neo4j_root.as_deref().unwrap_or(&config.neo4j.root);

        if !Path::new(csv_dir).is_dir() {
            eprintln!("❌ Csv directory not found: {csv_dir}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let command = CsvDirectory::new(csv_dir).and_then(|dir| {
            BulkImportCommand::for_directory(neo4j_root, &dir, ImportOptions::from(&config.neo4j))
        });
        match command {
            Ok(command) => {
                tracing::info!(command = %command, "Generated Neo4j import command");
                println!("{command}");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e, "Failed to generate import command")),
        }
    }
}
