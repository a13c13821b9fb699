//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 4 | Content store or object storage unreachable |
//! | 5 | Fatal error |

pub mod courses;
pub mod dump;
pub mod html_text;
pub mod import_command;
pub mod init;
pub mod upload;
pub mod validate;

use crate::config::{load_config_or_default, CourseGraphConfig};
use crate::domain::{CourseGraphError, ModuleStoreError, StorageError};
use crate::log_error_with_context;

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// Invalid or missing configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Store or bucket could not be reached
pub const EXIT_CONNECTION_ERROR: i32 = 4;

/// Anything else
pub const EXIT_FATAL_ERROR: i32 = 5;

/// Exit code for an error
pub fn exit_code_for(error: &CourseGraphError) -> i32 {
    match error {
        CourseGraphError::Configuration(_) | CourseGraphError::Validation(_) => EXIT_CONFIG_ERROR,
        CourseGraphError::ModuleStore(ModuleStoreError::Unavailable(_))
        | CourseGraphError::Storage(
            StorageError::ConnectionFailed(_) | StorageError::AuthenticationFailed(_),
        ) => EXIT_CONNECTION_ERROR,
        _ => EXIT_FATAL_ERROR,
    }
}

/// Log and print a failure, returning its exit code
pub(crate) fn report_failure(error: &CourseGraphError, context: &str) -> i32 {
    log_error_with_context!(error, context);
    eprintln!("❌ {context}: {error}");
    exit_code_for(error)
}

/// Load the configuration for a command
pub(crate) fn load_command_config(
    config_path: Option<&str>,
) -> Result<CourseGraphConfig, i32> {
    load_config_or_default(config_path)
        .map_err(|e| report_failure(&e, "Failed to load configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CourseGraphError::Configuration("x".into()), 2 ; "configuration")]
    #[test_case(CourseGraphError::Validation("x".into()), 2 ; "validation")]
    #[test_case(ModuleStoreError::Unavailable("x".into()).into(), 4 ; "store unavailable")]
    #[test_case(StorageError::ConnectionFailed("x".into()).into(), 4 ; "bucket unreachable")]
    #[test_case(StorageError::AuthenticationFailed("x".into()).into(), 4 ; "bucket forbidden")]
    #[test_case(ModuleStoreError::CourseNotFound("x".into()).into(), 5 ; "missing course")]
    #[test_case(CourseGraphError::Io("x".into()), 5 ; "io")]
    fn test_exit_code_for(error: CourseGraphError, expected: i32) {
        assert_eq!(exit_code_for(&error), expected);
    }

    #[test]
    fn test_load_command_config_missing_file() {
        assert_eq!(
            load_command_config(Some("/nonexistent/coursegraph.toml")).unwrap_err(),
            EXIT_CONFIG_ERROR
        );
    }
}
