//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL_ERROR, EXIT_SUCCESS};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include comments explaining every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing coursegraph configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [store] path at your exported course documents");
                println!("  2. Set [neo4j] root to the Neo4j installation");
                println!("  3. For uploads, set COURSEGRAPH_BUCKET_TOKEN in a .env file");
                println!("  4. Validate configuration: coursegraph validate-config");
                println!("  5. Run the dump: coursegraph dump-to-neo4j");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL_ERROR)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# coursegraph configuration

[application]
log_level = "info"

[store]
backend = "json"
path = "./courses"

[export]
csv_dir = "/tmp/csvs"
clear_csv_dir = true

[neo4j]
root = "/tmp/neo4j"
database = "coursegraph"
bad_tolerance = 1000000

[html_text]
output = "/tmp/modules.csv"

[upload]
enabled = false
backend = "local"
bucket = "coursegraph"
path = "/tmp/buckets"

[logging]
local_enabled = false
local_path = "/var/log/coursegraph"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# coursegraph configuration
#
# Every setting has a default; remove what you do not need. Any value can be
# overridden with COURSEGRAPH_<SECTION>_<KEY>, e.g. COURSEGRAPH_EXPORT_CSV_DIR.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Content Store
# ============================================================================
[store]
# Backend (currently only "json")
backend = "json"

# Directory of course documents, one *.json file per course
path = "./courses"

# ============================================================================
# Csv Export
# ============================================================================
[export]
# Directory receiving one csv per block type plus relationships.csv
csv_dir = "/tmp/csvs"

# Delete *.csv files in csv_dir before every dump
clear_csv_dir = true

# ============================================================================
# Neo4j Bulk Import
# ============================================================================
[neo4j]
# Neo4j installation; the command runs {root}/bin/neo4j-import
root = "/tmp/neo4j"

# Database directory created under {root}/data
database = "coursegraph"

# Bad records tolerated by the importer (dangling references are common)
bad_tolerance = 1000000

# ============================================================================
# Html Text Dump
# ============================================================================
[html_text]
# Output csv with the columns text,location,course_key
output = "/tmp/modules.csv"

# ============================================================================
# Object Storage Upload
# ============================================================================
[upload]
# Upload the csv files after every dump
enabled = false

# Backend: "local" (a directory) or "http" (PUT {endpoint}/{bucket}/{key})
backend = "http"
bucket = "coursegraph-csvs"
endpoint = "https://storage.example.com"

# Bearer token (use environment variable)
token = "${COURSEGRAPH_BUCKET_TOKEN}"

# Request timeout in seconds
timeout_seconds = 60

# Root directory for the local backend; the bucket is a subdirectory
# path = "/srv/buckets"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to local_path in addition to the console
local_enabled = false
local_path = "/var/log/coursegraph"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
