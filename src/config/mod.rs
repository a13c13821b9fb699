//! Configuration management for coursegraph.
//!
//! coursegraph reads an optional `coursegraph.toml`. Every setting has a
//! default, so the tool runs without a file; command-line flags override the
//! file, and `COURSEGRAPH_<SECTION>_<KEY>` environment variables override
//! both the file and the defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! backend = "json"
//! path = "/srv/course_exports"
//!
//! [export]
//! csv_dir = "/tmp/csvs"
//!
//! [neo4j]
//! root = "/opt/neo4j"
//! database = "coursegraph"
//! bad_tolerance = 1000000
//!
//! [upload]
//! enabled = true
//! backend = "http"
//! endpoint = "https://storage.example.com"
//! bucket = "coursegraph-csvs"
//! token = "${COURSEGRAPH_BUCKET_TOKEN}"
//! ```
//!
//! Use `${VAR_NAME}` to pull values from the environment (or a `.env` file).

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    ApplicationConfig, CourseGraphConfig, ExportConfig, HtmlTextConfig, LoggingConfig,
    Neo4jConfig, StoreConfig, UploadBackend, UploadConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
