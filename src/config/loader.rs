//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CourseGraphConfig, UploadBackend};
use super::secret::secret_string;
use crate::domain::errors::CourseGraphError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "coursegraph.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`CourseGraphConfig`]
/// 4. Applies environment variable overrides (COURSEGRAPH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if a referenced
/// environment variable is missing, or if validation fails.
///
/// # Examples
///
/// ```no_run
/// use coursegraph::config::loader::load_config;
///
/// let config = load_config("coursegraph.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CourseGraphConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CourseGraphError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CourseGraphError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CourseGraphConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CourseGraphError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads the configuration, falling back to defaults for the default path
///
/// An explicitly named file must exist. When no file was named and
/// `coursegraph.toml` is absent from the working directory, the built-in
/// defaults (plus environment overrides) are used.
pub fn load_config_or_default(path: Option<&str>) -> Result<CourseGraphConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            let mut config = CourseGraphConfig::default();
            apply_env_overrides(&mut config);
            config.validate().map_err(|e| {
                CourseGraphError::Configuration(format!("Configuration validation failed: {}", e))
            })?;
            Ok(config)
        }
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CourseGraphError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CourseGraphError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the COURSEGRAPH_* prefix
///
/// Variables follow the pattern `COURSEGRAPH_<SECTION>_<KEY>`, for example
/// `COURSEGRAPH_EXPORT_CSV_DIR` or `COURSEGRAPH_NEO4J_ROOT`.
fn apply_env_overrides(config: &mut CourseGraphConfig) {
    if let Ok(val) = std::env::var("COURSEGRAPH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_STORE_BACKEND") {
        config.store.backend = val;
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_STORE_PATH") {
        config.store.path = val;
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_EXPORT_CSV_DIR") {
        config.export.csv_dir = val;
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_EXPORT_CLEAR_CSV_DIR") {
        config.export.clear_csv_dir = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_NEO4J_ROOT") {
        config.neo4j.root = val;
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_NEO4J_DATABASE") {
        config.neo4j.database = val;
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_NEO4J_BAD_TOLERANCE") {
        if let Ok(tolerance) = val.parse() {
            config.neo4j.bad_tolerance = tolerance;
        }
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_HTML_TEXT_OUTPUT") {
        config.html_text.output = val;
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_ENABLED") {
        config.upload.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_BACKEND") {
        match val.to_lowercase().as_str() {
            "local" => config.upload.backend = UploadBackend::Local,
            "http" => config.upload.backend = UploadBackend::Http,
            other => tracing::warn!(backend = %other, "Ignoring unknown COURSEGRAPH_UPLOAD_BACKEND"),
        }
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_BUCKET") {
        config.upload.bucket = val;
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_ENDPOINT") {
        config.upload.endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_PATH") {
        config.upload.path = Some(val);
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_UPLOAD_TOKEN") {
        config.upload.token = Some(secret_string(val));
    }

    if let Ok(val) = std::env::var("COURSEGRAPH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("COURSEGRAPH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CG_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${CG_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("CG_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CG_LOADER_MISSING_VAR");
        let input = "token = \"${CG_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CG_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CG_LOADER_COMMENTED_VAR");
        let input = "# token = \"${CG_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-coursegraph.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_explicit_missing_file() {
        let result = load_config_or_default(Some("nonexistent-coursegraph.toml"));
        assert!(matches!(result, Err(CourseGraphError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[store]
path = "/srv/course_exports"

[export]
csv_dir = "/data/csvs"

[neo4j]
root = "/opt/neo4j"
database = "graph"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.store.path, "/srv/course_exports");
        assert_eq!(config.neo4j.database, "graph");
        assert_eq!(config.neo4j.bad_tolerance, 1_000_000);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[application]\nlog_level = \"loud\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
