//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use super::secret::secret_string;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "INITIATIVE_EXPORT";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ExporterConfig
/// 4. Applies environment variable overrides (INITIATIVE_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable, a
/// referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use initiative_export::config::loader::load_config;
///
/// let config = load_config("initiative-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Steps 1 to 4 of [`load_config`], without validation
///
/// For callers that layer further overrides (such as command-line flags)
/// on top and validate the result themselves.
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable, a
/// referenced variable is unset, or the TOML is malformed.
pub fn read_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ExporterConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Validate a configuration, wrapping the message as a `Configuration` error
///
/// # Errors
///
/// Returns a `Configuration` error naming the first invalid field.
pub fn validate(config: &ExporterConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

/// Applies environment variable overrides using the INITIATIVE_EXPORT_* prefix
///
/// Variables follow the pattern `INITIATIVE_EXPORT_<SECTION>_<KEY>`, for
/// example `INITIATIVE_EXPORT_JIRA_TOKEN` or `INITIATIVE_EXPORT_EXPORT_OUTPUT_DIR`.
/// Unparseable numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut ExporterConfig) {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Jira overrides
    if let Some(val) = env_override("JIRA_BASE_URL") {
        config.jira.base_url = val;
    }
    if let Some(val) = env_override("JIRA_TOKEN") {
        config.jira.token = secret_string(val);
    }
    if let Some(val) = env_override("JIRA_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.jira.timeout_seconds = secs;
        }
    }
    if let Some(val) = env_override("JIRA_TLS_VERIFY") {
        if let Ok(verify) = val.parse() {
            config.jira.tls_verify = verify;
        }
    }

    // Query overrides
    if let Some(val) = env_override("JIRA_QUERY_PROJECT") {
        config.jira.query.project = val;
    }
    if let Some(val) = env_override("JIRA_QUERY_PARENT_ISSUE_TYPE") {
        config.jira.query.parent_issue_type = val;
    }
    if let Some(val) = env_override("JIRA_QUERY_CHILD_PROJECT") {
        config.jira.query.child_project = Some(val);
    }
    if let Some(val) = env_override("JIRA_QUERY_MAX_PARENTS") {
        if let Ok(max) = val.parse() {
            config.jira.query.max_parents = max;
        }
    }
    if let Some(val) = env_override("JIRA_QUERY_MAX_CHILDREN") {
        if let Ok(max) = val.parse() {
            config.jira.query.max_children = max;
        }
    }

    // Export overrides
    if let Some(val) = env_override("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = env_override("EXPORT_FILE_PREFIX") {
        config.export.file_prefix = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LOADER_TEST_TOKEN", "test_value");
        let input = "token = \"${LOADER_TEST_TOKEN}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("LOADER_TEST_TOKEN");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LOADER_MISSING_VAR");
        let input = "token = \"${LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("LOADER_COMMENTED_VAR");
        let input = "# token = \"${LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ExporterError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[jira]
base_url = "https://jira.example.com/"
token = "pat-value"

[jira.query]
project = "ISDOP"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.jira.base_url, "https://jira.example.com/");
        assert_eq!(config.jira.token.expose_secret().as_str(), "pat-value");
        assert_eq!(config.jira.query.parent_issue_type, "Business Initiative");
        assert_eq!(config.jira.query.max_parents, 1000);
        assert_eq!(config.export.file_prefix, "isdop_batch");
    }

    #[test]
    fn test_load_config_invalid_values() {
        let toml_content = r#"
[jira]
base_url = "ftp://jira.example.com/"
token = "pat-value"

[jira.query]
project = "ISDOP"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_read_config_defers_validation() {
        let toml_content = r#"
[jira]
base_url = "https://jira.example.com/"
token = "pat-value"

[jira.query]
project = "IS DOP"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let mut config = read_config(temp_file.path()).unwrap();
        assert!(validate(&config).is_err());

        config.jira.query.project = "ISDOP".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_load_config_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[jira\nbase_url = ").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(matches!(err, ExporterError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
