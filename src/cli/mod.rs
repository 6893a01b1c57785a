//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Export Jira Business Initiatives and their child issues to CSV
#[derive(Parser, Debug)]
#[command(name = "initiative-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "initiative-export.toml",
        env = "INITIATIVE_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "INITIATIVE_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all parents and their children to batched CSV files
    Export(commands::export::ExportArgs),

    /// List the children of a single parent issue
    Children(commands::children::ChildrenArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["initiative-export", "export"]);
        assert_eq!(cli.config, "initiative-export.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "initiative-export",
            "export",
            "--output-dir",
            "out",
            "--project",
            "OPS",
            "--parent-type",
            "Theme",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.output_dir.as_deref(), Some("out"));
                assert_eq!(args.project.as_deref(), Some("OPS"));
                assert_eq!(args.parent_type.as_deref(), Some("Theme"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["initiative-export", "-c", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["initiative-export", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_children() {
        let cli = Cli::parse_from(["initiative-export", "children", "ISDOP-1"]);
        match cli.command {
            Commands::Children(args) => {
                assert_eq!(args.parent_key.as_deref(), Some("ISDOP-1"));
                assert_eq!(args.max_results, 50);
                assert!(args.jql.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_children_requires_key() {
        assert!(Cli::try_parse_from(["initiative-export", "children"]).is_err());
    }

    #[test]
    fn test_cli_parse_children_jql_without_key() {
        let cli = Cli::parse_from([
            "initiative-export",
            "children",
            "--jql",
            "assignee = currentUser()",
        ]);
        match cli.command {
            Commands::Children(args) => {
                assert!(args.parent_key.is_none());
                assert_eq!(args.jql.as_deref(), Some("assignee = currentUser()"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["initiative-export", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["initiative-export", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.force));
    }
}
