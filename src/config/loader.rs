//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ArgusConfig;
use crate::domain::errors::ArgusError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ArgusConfig`]
/// 4. Applies environment variable overrides (`ARGUS_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use argus::config::load_config;
///
/// let config = load_config("argus.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ArgusConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ArgusError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ArgusError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ArgusConfig = toml::from_str(&contents)
        .map_err(|e| ArgusError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ArgusError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads the configuration file if it exists, defaults otherwise
///
/// Used by the CLI so a bare `argus scan file.pdf` works out of the box;
/// env overrides still apply to the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ArgusConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }
    let mut config = ArgusConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        ArgusError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ArgusError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ARGUS_* prefix
///
/// Environment variables follow the pattern: ARGUS_<SECTION>_<KEY>
/// For example: ARGUS_DISPATCH_WORKERS, ARGUS_ANALYSIS_CONFIDENCE_THRESHOLD
fn apply_env_overrides(config: &mut ArgusConfig) {
    if let Ok(val) = std::env::var("ARGUS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ARGUS_EXTRACTION_MIN_LENGTH_STRUCTURED") {
        if let Ok(len) = val.parse() {
            config.extraction.min_length_structured = len;
        }
    }
    if let Ok(val) = std::env::var("ARGUS_EXTRACTION_MIN_LENGTH_SIMPLE") {
        if let Ok(len) = val.parse() {
            config.extraction.min_length_simple = len;
        }
    }
    if let Ok(val) = std::env::var("ARGUS_EXTRACTION_SCRATCH_DIR") {
        config.extraction.scratch_dir = Some(val.into());
    }

    if let Ok(val) = std::env::var("ARGUS_ANALYSIS_CONFIDENCE_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.analysis.confidence_threshold = threshold;
        }
    }
    if let Ok(val) = std::env::var("ARGUS_ANALYSIS_PATTERN_LIBRARY") {
        config.analysis.pattern_library = Some(val.into());
    }
    if let Ok(val) = std::env::var("ARGUS_ANALYSIS_SCORER_ARTIFACT") {
        config.analysis.scorer_artifact = Some(val.into());
    }

    if let Ok(val) = std::env::var("ARGUS_DISPATCH_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.dispatch.workers = workers;
        }
    }
    if let Ok(val) = std::env::var("ARGUS_DISPATCH_DEADLINE_SECONDS") {
        if let Ok(deadline) = val.parse() {
            config.dispatch.deadline_seconds = deadline;
        }
    }

    if let Ok(val) = std::env::var("ARGUS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ARGUS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ARGUS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ARGUS_TEST_VAR", "test_value");
        let input = "scratch_dir = \"${ARGUS_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "scratch_dir = \"test_value\"\n");
        std::env::remove_var("ARGUS_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ARGUS_MISSING_VAR");
        let input = "scratch_dir = \"${ARGUS_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# uses ${ARGUS_NOT_SET_ANYWHERE}\nworkers = 4";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${ARGUS_NOT_SET_ANYWHERE}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent.toml").unwrap();
        assert_eq!(config.dispatch.workers, 4);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[extraction]
min_length_structured = 80
min_length_simple = 20

[analysis]
confidence_threshold = 0.25

[dispatch]
workers = 8
deadline_seconds = 30
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.extraction.min_length_structured, 80);
        assert_eq!(config.analysis.confidence_threshold, 0.25);
        assert_eq!(config.dispatch.workers, 8);
        assert_eq!(config.dispatch.deadline_seconds, 30);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let toml_content = "[dispatch]\nworkers = 0\n";
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
