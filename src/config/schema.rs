//! Configuration schema types
//!
//! This module defines the configuration structure that maps to
//! `coursegraph.toml`. Every section has defaults, so an empty file (or no
//! file at all) yields a working configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main coursegraph configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CourseGraphConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Content store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Neo4j import command settings
    #[serde(default)]
    pub neo4j: Neo4jConfig,

    /// HTML text dump settings
    #[serde(default)]
    pub html_text: HtmlTextConfig,

    /// Object storage upload settings
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourseGraphConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a readable message naming the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.export.validate()?;
        self.neo4j.validate()?;
        self.html_text.validate()?;
        self.upload.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend (only "json" is supported)
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Directory holding one JSON document per course
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("store.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
        }
    }
}

/// CSV export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where to dump csv files to
    #[serde(default = "default_csv_dir")]
    pub csv_dir: String,

    /// Delete existing csv files before a dump
    #[serde(default = "default_true")]
    pub clear_csv_dir: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.csv_dir.trim().is_empty() {
            return Err("export.csv_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_dir: default_csv_dir(),
            clear_csv_dir: true,
        }
    }
}

/// Neo4j bulk import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Neo4j installation the import command runs from
    #[serde(default = "default_neo4j_root")]
    pub root: String,

    /// Database directory name under `{root}/data`
    #[serde(default = "default_neo4j_database")]
    pub database: String,

    /// Number of bad records the importer tolerates
    #[serde(default = "default_bad_tolerance")]
    pub bad_tolerance: u64,
}

impl Neo4jConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("neo4j.root cannot be empty".to_string());
        }
        if self.database.trim().is_empty() || self.database.contains(['/', ' ']) {
            return Err(format!(
                "neo4j.database must be a plain directory name, got '{}'",
                self.database
            ));
        }
        Ok(())
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            root: default_neo4j_root(),
            database: default_neo4j_database(),
            bad_tolerance: default_bad_tolerance(),
        }
    }
}

/// HTML text dump configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlTextConfig {
    /// Output CSV file
    #[serde(default = "default_html_text_output")]
    pub output: String,
}

impl HtmlTextConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output.trim().is_empty() {
            return Err("html_text.output cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for HtmlTextConfig {
    fn default() -> Self {
        Self {
            output: default_html_text_output(),
        }
    }
}

/// Object storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UploadBackend {
    /// A local directory standing in for a bucket
    #[default]
    Local,
    /// HTTP PUT to an S3/GCS-compatible endpoint
    Http,
}

impl std::fmt::Display for UploadBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadBackend::Local => write!(f, "local"),
            UploadBackend::Http => write!(f, "http"),
        }
    }
}

/// Object storage upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Upload csv files after every dump
    #[serde(default)]
    pub enabled: bool,

    /// Backend (local or http)
    #[serde(default)]
    pub backend: UploadBackend,

    /// Bucket name
    #[serde(default)]
    pub bucket: String,

    /// Endpoint URL (http backend)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Root directory (local backend); the bucket is a subdirectory
    #[serde(default)]
    pub path: Option<String>,

    /// Bearer token (http backend)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl UploadConfig {
    /// Validates the upload section
    ///
    /// Settings are only checked when uploads are enabled; the `upload`
    /// command validates them explicitly through [`UploadConfig::validate_target`].
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            self.validate_target()?;
        }
        Ok(())
    }

    /// Validates the settings needed to reach the bucket
    pub fn validate_target(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("upload.bucket cannot be empty".to_string());
        }
        if self.bucket.contains('/') {
            return Err(format!("upload.bucket cannot contain '/': {}", self.bucket));
        }

        match self.backend {
            UploadBackend::Local => {
                if self.path.as_deref().map(str::trim).unwrap_or("").is_empty() {
                    return Err("upload.path is required when upload.backend = 'local'".to_string());
                }
            }
            UploadBackend::Http => {
                let endpoint = self.endpoint.as_deref().unwrap_or("");
                if endpoint.is_empty() {
                    return Err(
                        "upload.endpoint is required when upload.backend = 'http'".to_string()
                    );
                }
                if url::Url::parse(endpoint).is_err()
                    || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
                {
                    return Err(format!(
                        "upload.endpoint must be an http:// or https:// URL, got '{endpoint}'"
                    ));
                }
                if self.timeout_seconds == 0 {
                    return Err("upload.timeout_seconds must be > 0".to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: UploadBackend::default(),
            bucket: String::new(),
            endpoint: None,
            path: None,
            token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_store_backend() -> String {
    "json".to_string()
}

fn default_store_path() -> String {
    "./courses".to_string()
}

fn default_csv_dir() -> String {
    "/tmp/csvs".to_string()
}

fn default_neo4j_root() -> String {
    "/tmp/neo4j".to_string()
}

fn default_neo4j_database() -> String {
    "coursegraph".to_string()
}

fn default_bad_tolerance() -> u64 {
    1_000_000
}

fn default_html_text_output() -> String {
    "/tmp/modules.csv".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "/var/log/coursegraph".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
