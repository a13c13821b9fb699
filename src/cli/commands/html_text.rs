//! HTML text dump command
//!
//! This module implements the `dump-html-as-text` command.

use super::{load_command_config, report_failure, EXIT_SUCCESS};
use crate::adapters::modulestore::create_content_store;
use crate::core::html_text::{collect_html_text, write_html_text};
use clap::Args;

/// Arguments for the dump-html-as-text command
#[derive(Args, Debug, Default)]
pub struct HtmlTextArgs {
    /// Output csv file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Content store directory
    #[arg(long)]
    pub store: Option<String>,
}

impl HtmlTextArgs {
    /// Execute the dump-html-as-text command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut config = match load_command_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        if let Some(store) = &self.store {
            config.store.path = store.clone();
        }
        let output = self.output.as_deref().unwrap_or(&config.html_text.output);

        let store = match create_content_store(&config.store).await {
            Ok(store) => store,
            Err(e) => return Ok(report_failure(&e, "Failed to open content store")),
        };

        let rows = match collect_html_text(store.as_ref()).await {
            Ok(rows) => rows,
            Err(e) => return Ok(report_failure(&e, "Failed to read html blocks")),
        };

        match write_html_text(output, &rows) {
            Ok(path) => {
                tracing::info!(output = %path.display(), rows = rows.len(), "Wrote html text");
                println!("✅ Wrote {} html blocks to {}", rows.len(), path.display());
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e, "Failed to write html text")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::EXIT_CONNECTION_ERROR;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_store_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = HtmlTextArgs {
            output: Some(temp_dir.path().join("modules.csv").to_string_lossy().to_string()),
            store: Some("/nonexistent/courses".to_string()),
        };
        assert_eq!(args.execute(None).await.unwrap(), EXIT_CONNECTION_ERROR);
    }
}
