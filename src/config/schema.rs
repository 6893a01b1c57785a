//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use crate::domain::ids::ProjectKey;
use serde::{Deserialize, Serialize};

/// Upper bound for either result cap
pub const MAX_RESULTS_LIMIT: usize = 1000;

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Jira server configuration
    pub jira: JiraConfig,

    /// Export output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.jira.validate()?;
        self.export.validate()?;
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

/// Jira server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira server, e.g. `https://jira.example.com/`
    pub base_url: String,

    /// Personal access token, sent as a bearer credential on every request.
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Query configuration
    pub query: QueryConfig,
}

impl JiraConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("jira.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("jira.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("jira.base_url '{}' is not a valid URL", self.base_url));
        }

        if self.token.expose_secret().is_blank() {
            return Err("jira.token cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("jira.timeout_seconds must be > 0".to_string());
        }

        self.query.validate()?;
        Ok(())
    }

    /// Base URL without trailing slashes
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Which issues to fetch and how many
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Project holding the parent issues
    pub project: String,

    /// Issue type name of the parents
    #[serde(default = "default_parent_issue_type")]
    pub parent_issue_type: String,

    /// Project searched for child issues (defaults to `project`)
    #[serde(default)]
    pub child_project: Option<String>,

    /// Result cap for the parent query
    #[serde(default = "default_max_parents")]
    pub max_parents: usize,

    /// Result cap for each child query
    #[serde(default = "default_max_children")]
    pub max_children: usize,
}

impl QueryConfig {
    fn validate(&self) -> Result<(), String> {
        ProjectKey::new(self.project.as_str()).map_err(|e| format!("jira.query.project: {e}"))?;

        if let Some(child_project) = &self.child_project {
            ProjectKey::new(child_project.as_str())
                .map_err(|e| format!("jira.query.child_project: {e}"))?;
        }

        if self.parent_issue_type.trim().is_empty() {
            return Err("jira.query.parent_issue_type cannot be empty".to_string());
        }

        if self.parent_issue_type.contains('"') {
            return Err("jira.query.parent_issue_type cannot contain '\"'".to_string());
        }

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_parents) {
            return Err(format!(
                "jira.query.max_parents must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                self.max_parents
            ));
        }

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_children) {
            return Err(format!(
                "jira.query.max_children must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                self.max_children
            ));
        }

        Ok(())
    }

    /// Project searched for children
    pub fn child_project(&self) -> &str {
        self.child_project.as_deref().unwrap_or(&self.project)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            parent_issue_type: default_parent_issue_type(),
            child_project: None,
            max_parents: default_max_parents(),
            max_children: default_max_children(),
        }
    }
}

/// Export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the batch files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix, `<prefix>_<batch>_<timestamp>.csv`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.file_prefix.is_empty() {
            return Err("export.file_prefix cannot be empty".to_string());
        }

        if self.file_prefix.contains(['/', '\\']) {
            return Err(format!(
                "export.file_prefix '{}' cannot contain path separators",
                self.file_prefix
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
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

fn default_timeout_seconds() -> u64 {
    60
}

fn default_parent_issue_type() -> String {
    "Business Initiative".to_string()
}

fn default_max_parents() -> usize {
    1000
}

fn default_max_children() -> usize {
    200
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "isdop_batch".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
