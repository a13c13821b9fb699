//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the coursegraph configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::{load_config_or_default, UploadBackend, DEFAULT_CONFIG_FILE};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading runs the same validation the other commands rely on
        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Store: {} ({})", config.store.path, config.store.backend);
        println!("  Csv Directory: {}", config.export.csv_dir);
        println!("  Clear Before Dump: {}", config.export.clear_csv_dir);
        println!("  Neo4j Root: {}", config.neo4j.root);
        println!("  Neo4j Database: {}", config.neo4j.database);
        println!("  Bad Tolerance: {}", config.neo4j.bad_tolerance);
        println!("  Html Text Output: {}", config.html_text.output);

        if config.upload.enabled {
            println!("  Upload Backend: {}", config.upload.backend);
            match config.upload.backend {
                UploadBackend::Local => println!(
                    "  Upload Path: {}/{}",
                    config.upload.path.as_deref().unwrap_or_default(),
                    config.upload.bucket
                ),
                UploadBackend::Http => println!(
                    "  Upload Endpoint: {} (bucket {}, token {})",
                    config.upload.endpoint.as_deref().unwrap_or_default(),
                    config.upload.bucket,
                    if config.upload.token.is_some() { "set" } else { "not set" }
                ),
            }
        } else {
            println!("  Upload: disabled");
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
