//! Init command implementation
//!
//! Writes a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "initiative-export.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, starter_config()) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set jira.base_url and jira.query.project in {}", self.output);
                println!("  2. Put your personal access token in .env as JIRA_TOKEN=...");
                println!("  3. Validate configuration: initiative-export validate-config");
                println!("  4. Run export: initiative-export export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

fn starter_config() -> &'static str {
    r#"# Jira initiative export configuration
#
# Every value can be overridden with INITIATIVE_EXPORT_<SECTION>_<KEY>,
# e.g. INITIATIVE_EXPORT_JIRA_BASE_URL. ${VAR} is replaced from the environment.

[application]
# trace, debug, info, warn, error
log_level = "info"

[jira]
base_url = "https://jira.example.com/"
# Personal access token, sent as a bearer token
token = "${JIRA_TOKEN}"
timeout_seconds = 60
tls_verify = true

[jira.query]
# Project holding the parent issues
project = "ISDOP"
parent_issue_type = "Business Initiative"
# Project searched for children (defaults to project)
# child_project = "ISDOP"
max_parents = 1000
max_children = 200

[export]
# Files are named <file_prefix>_<batch>_<YYYYMMDD_HHMMSS>.csv
output_dir = "."
file_prefix = "isdop_batch"

[logging]
local_enabled = false
local_path = "./logs"
# daily or hourly
local_rotation = "daily"
"#
}
