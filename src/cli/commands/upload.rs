//! Upload command implementation
//!
//! This module implements the `upload` command, which pushes an existing
//! csv directory to the configured bucket.

use super::{load_command_config, report_failure, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::adapters::storage::{create_object_store, upload_directory};
use clap::Args;
use std::path::Path;

/// Arguments for the upload command
#[derive(Args, Debug, Default)]
pub struct UploadArgs {
    /// Directory holding the csv files
    #[arg(long)]
    pub csv_dir: Option<String>,
}

impl UploadArgs {
    /// Execute the upload command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let config = match load_command_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let csv_dir = self.csv_dir.as_deref().unwrap_or(&config.export.csv_dir);
        if !Path::new(csv_dir).is_dir() {
            eprintln!("❌ Csv directory not found: {csv_dir}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let store = match create_object_store(&config.upload).await {
            Ok(store) => store,
            Err(e) => return Ok(report_failure(&e, "Failed to configure upload")),
        };

        println!("☁️  Uploading {} to {}", csv_dir, store.describe());
        match upload_directory(store.as_ref(), Path::new(csv_dir)).await {
            Ok(keys) => {
                for key in &keys {
                    println!("  {key}");
                }
                println!("✅ Uploaded {} files", keys.len());
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e, "Upload failed")),
        }
    }
}
