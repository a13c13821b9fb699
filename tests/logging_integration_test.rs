//! Integration tests for logging configuration

use coursegraph::config::LoggingConfig;
use coursegraph::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "/var/log/coursegraph");
}

#[test]
fn test_logging_config_from_toml() {
    let config: LoggingConfig =
        toml::from_str("local_enabled = true\nlocal_path = \"/tmp/cg\"\n").unwrap();
    assert!(config.local_enabled);
    assert_eq!(config.local_path, "/tmp/cg");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected() {
    let result = init_logging("chatty", &LoggingConfig::default());
    assert!(result.is_err());
}

// The global subscriber can only be installed once per process, so this is
// the only test in this file that initializes logging successfully
#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(csv_dir = "/tmp/csvs", "Starting dump");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("coursegraph.log").exists());
}
