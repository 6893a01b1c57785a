//! Export command implementation
//!
//! Runs the full pipeline: parents, children, batched CSV files.

use crate::config::loader::validate;
use crate::config::{read_config, ExporterConfig};
use crate::core::export::{ExportCoordinator, ExportOutcome, ExportSummary};
use crate::domain::ExporterError;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the directory batch files are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Override the project holding the parent issues
    #[arg(long)]
    pub project: Option<String>,

    /// Override the parent issue type
    #[arg(long, value_name = "TYPE")]
    pub parent_type: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match self.resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        std::fs::create_dir_all(&config.export.output_dir).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create output directory {}: {e}",
                config.export.output_dir
            )
        })?;

        println!("🚀 Starting Jira export");
        println!("  Project: {}", config.jira.query.project);
        println!("  Parent type: {}", config.jira.query.parent_issue_type);
        println!("  Output: {}", config.export.output_dir);
        println!();

        let coordinator = match ExportCoordinator::connect(&config).await {
            Ok(c) => {
                println!("✅ Connected to Jira");
                c
            }
            Err(e) if e.is_connection_error() => {
                tracing::error!(error = %e, "Failed to connect to Jira");
                eprintln!("❌ Failed to connect to Jira: {e}");
                return Ok(4);
            }
            Err(e @ ExporterError::Configuration(_)) => {
                eprintln!("{e}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Jira did not answer as expected");
                eprintln!("❌ Failed to connect to Jira: {e}");
                return Ok(4);
            }
        };
        let mut coordinator = coordinator.on_progress(|event| println!("{event}"));

        let outcome = match coordinator.execute_export().await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        match &outcome {
            ExportOutcome::NoWork(summary) => {
                println!("📭 No parent issues found - no files written");
                print_errors(summary);
            }
            ExportOutcome::Completed(summary) => print_summary(summary),
        }

        Ok(0)
    }

    /// Read the file, layer the command-line overrides on top, then validate
    fn resolve_config(&self, config_path: &str) -> crate::domain::Result<ExporterConfig> {
        let mut config = read_config(config_path)?;
        self.apply_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut ExporterConfig) {
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(project) = &self.project {
            tracing::info!(project = %project, "Overriding project from CLI");
            config.jira.query.project = project.clone();
        }
        if let Some(parent_type) = &self.parent_type {
            tracing::info!(parent_type = %parent_type, "Overriding parent issue type from CLI");
            config.jira.query.parent_issue_type = parent_type.clone();
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Parents processed: {}", summary.total_parents);
    println!("  Child issues: {}", summary.total_children);
    println!("  Rows written: {}", summary.total_rows);
    println!("  Files created: {}", summary.files.len());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    if !summary.files.is_empty() {
        println!();
        println!("📁 Files:");
        for file in &summary.files {
            println!(
                "  - {} ({} rows, {} parents, {} bytes)",
                file.file_name(),
                file.rows,
                file.parent_count,
                file.bytes
            );
        }
    }
    println!();

    print_errors(summary);

    if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with errors");
    }
}

fn print_errors(summary: &ExportSummary) {
    if summary.errors.is_empty() {
        return;
    }

    println!("⚠️  Errors encountered:");
    for error in &summary.errors {
        println!("  - {:?}: {}", error.error_type, error.message);
        if let Some(context) = &error.context {
            println!("    Context: {context}");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::config::{JiraConfig, QueryConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config() -> ExporterConfig {
        ExporterConfig {
            application: Default::default(),
            jira: JiraConfig {
                base_url: "https://jira.example.com".to_string(),
                token: secret_string("token".to_string()),
                timeout_seconds: 60,
                tls_verify: true,
                query: QueryConfig {
                    project: "ISDOP".to_string(),
                    ..Default::default()
                },
            },
            export: Default::default(),
            logging: Default::default(),
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut cfg = config();
        ExportArgs::default().apply_overrides(&mut cfg);

        assert_eq!(cfg.jira.query.project, "ISDOP");
        assert_eq!(cfg.jira.query.parent_issue_type, "Business Initiative");
        assert_eq!(cfg.export.output_dir, ".");
    }

    #[test]
    fn test_overrides_applied() {
        let mut cfg = config();
        let args = ExportArgs {
            output_dir: Some("exports".to_string()),
            project: Some("OPS".to_string()),
            parent_type: Some("Theme".to_string()),
        };
        args.apply_overrides(&mut cfg);

        assert_eq!(cfg.export.output_dir, "exports");
        assert_eq!(cfg.jira.query.project, "OPS");
        assert_eq!(cfg.jira.query.parent_issue_type, "Theme");
    }

    fn config_file(project: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[jira]
base_url = "https://jira.example.com"
token = "pat"

[jira.query]
project = "{project}"
"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_cli_project_fixes_invalid_file_project() {
        let file = config_file("IS DOP");
        let args = ExportArgs {
            project: Some("OPS".to_string()),
            ..Default::default()
        };

        let cfg = args.resolve_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.jira.query.project, "OPS");
    }

    #[test]
    fn test_invalid_cli_override_is_rejected() {
        let file = config_file("ISDOP");
        let args = ExportArgs {
            project: Some("not a key".to_string()),
            ..Default::default()
        };

        let err = args
            .resolve_config(file.path().to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, ExporterError::Configuration(_)));
        assert!(err.to_string().contains("project"));
    }
}
