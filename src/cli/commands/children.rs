//! Children command implementation
//!
//! Lists the child issues of one parent with assignee and priority, which
//! the CSV export leaves out.

use crate::adapters::jira::{IssueTracker, JiraClient, Jql};
use crate::config::load_config;
use crate::config::schema::MAX_RESULTS_LIMIT;
use crate::domain::{IssueKey, IssueRecord, ProjectKey};
use clap::Args;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 80;

/// Arguments for the children command
#[derive(Args, Debug)]
pub struct ChildrenArgs {
    /// Key of the parent issue, e.g. ISDOP-1
    #[arg(required_unless_present = "jql")]
    pub parent_key: Option<String>,

    /// Maximum number of issues to list
    #[arg(long, default_value_t = 50)]
    pub max_results: usize,

    /// Project searched for children (defaults to the configured child project)
    #[arg(long)]
    pub project: Option<String>,

    /// Run this JQL instead of the child query
    #[arg(long, conflicts_with = "project")]
    pub jql: Option<String>,
}

impl ChildrenArgs {
    /// Execute the children command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            eprintln!("--max-results must be between 1 and {MAX_RESULTS_LIMIT}");
            return Ok(2);
        }

        let jql = match self.build_query(config.jira.query.child_project()) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let client = match JiraClient::connect(&config.jira).await {
            Ok(c) => {
                println!("✅ Successfully connected to Jira");
                c
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to Jira");
                eprintln!("❌ Failed to connect to Jira: {e}");
                return Ok(4);
            }
        };

        println!("🔍 Executing query: {jql}");
        let issues = match client.search_issues(jql.as_str(), self.max_results).await {
            Ok(issues) => {
                println!("📊 Found {} issues", issues.len());
                issues
            }
            Err(e) => {
                tracing::warn!(jql = %jql, error = %e, "Child query failed");
                println!("❌ Error executing query: {e}");
                Vec::new()
            }
        };

        if issues.is_empty() {
            println!("📭 No issues found");
            return Ok(0);
        }

        println!();
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("QUERY RESULTS");
        println!("{}", "=".repeat(RULE_WIDTH));
        for (i, issue) in issues.iter().enumerate() {
            print!("{}", render_issue(i + 1, issue));
        }

        Ok(0)
    }

    fn build_query(&self, default_project: &str) -> Result<Jql, String> {
        if let Some(raw) = &self.jql {
            return Ok(Jql::raw(raw.as_str()));
        }

        let parent = self
            .parent_key
            .as_deref()
            .ok_or_else(|| "a parent key is required unless --jql is given".to_string())?;
        let parent = IssueKey::new(parent)?;
        let project = ProjectKey::new(self.project.as_deref().unwrap_or(default_project))?;
        Ok(Jql::children_of(&project, &parent))
    }
}

fn render_issue(index: usize, issue: &IssueRecord) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{index}. Issue Key: {}", issue.key);
    let _ = writeln!(out, "   Summary: {}", issue.summary);
    let _ = writeln!(out, "   Status: {}", issue.status.as_deref().unwrap_or("-"));
    let _ = writeln!(
        out,
        "   Assignee: {}",
        issue.assignee.as_deref().unwrap_or("Unassigned")
    );
    let _ = writeln!(
        out,
        "   Priority: {}",
        issue.priority.as_deref().unwrap_or("No Priority")
    );
    let _ = writeln!(
        out,
        "   Issue Type: {}",
        issue.issue_type.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "   URL: {}", issue.url);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH / 2));
    out
}
