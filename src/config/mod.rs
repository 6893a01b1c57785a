//! Configuration management.
//!
//! The exporter reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `INITIATIVE_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use initiative_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("initiative-export.toml")?;
//!
//! println!("Jira: {}", config.jira.base_url);
//! println!("Project: {}", config.jira.query.project);
//! println!("Output: {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [jira]
//! base_url = "https://jira.example.com/"
//! token = "${JIRA_TOKEN}"
//!
//! [jira.query]
//! project = "ISDOP"
//! parent_issue_type = "Business Initiative"
//!
//! [export]
//! output_dir = "./exports"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, read_config};
pub use schema::{
    ApplicationConfig, ExportConfig, ExporterConfig, JiraConfig, LoggingConfig, QueryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
