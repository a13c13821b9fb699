//! Course listing command
//!
//! This module implements the `list-courses` command, which prints a JSON
//! object mapping every course id to its enrollment end.

use super::{load_command_config, report_failure, EXIT_FATAL_ERROR, EXIT_SUCCESS};
use crate::adapters::modulestore::create_content_store;
use crate::core::courses::course_enrollment_windows;
use clap::Args;
use serde_json::Value;

/// Arguments for the list-courses command
#[derive(Args, Debug, Default)]
pub struct ListCoursesArgs {
    /// Content store directory
    #[arg(long)]
    pub store: Option<String>,
}

impl ListCoursesArgs {
    /// Execute the list-courses command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut config = match load_command_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        if let Some(store) = &self.store {
            config.store.path = store.clone();
        }

        let store = match create_content_store(&config.store).await {
            Ok(store) => store,
            Err(e) => return Ok(report_failure(&e, "Failed to open content store")),
        };

        let windows = match course_enrollment_windows(store.as_ref()).await {
            Ok(windows) => windows,
            Err(e) => return Ok(report_failure(&e, "Failed to list courses")),
        };

        match serde_json::to_string_pretty(&Value::Object(windows)) {
            Ok(json) => {
                println!("{json}");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("❌ Failed to encode course list: {e}");
                Ok(EXIT_FATAL_ERROR)
            }
        }
    }
}
