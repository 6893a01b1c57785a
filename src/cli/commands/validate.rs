//! Validate config command implementation
//!
//! Loads the configuration file and prints what an export would use.

use crate::config::{load_config, ExporterConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying substitutions and overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print!("{}", describe(&config));
        println!();
        Ok(0)
    }
}

fn describe(config: &ExporterConfig) -> String {
    let query = &config.jira.query;
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Jira Server: {}", config.jira.trimmed_base_url()),
        format!("  Timeout: {}s", config.jira.timeout_seconds),
        format!("  TLS Verify: {}", config.jira.tls_verify),
        format!("  Project: {}", query.project),
        format!("  Parent Issue Type: {}", query.parent_issue_type),
        format!("  Child Project: {}", query.child_project()),
        format!("  Max Parents: {}", query.max_parents),
        format!("  Max Children per Parent: {}", query.max_children),
        format!("  Output Directory: {}", config.export.output_dir),
        format!("  File Prefix: {}", config.export.file_prefix),
    ];
    if config.logging.local_enabled {
        lines.push(format!(
            "  Log Files: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
