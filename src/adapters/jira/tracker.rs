//! Issue tracker trait definition
//!
//! The export pipeline only needs one remote operation: run a filter
//! expression and get back an ordered list of issues. Keeping it behind a
//! trait lets the coordinator be driven by the Jira client in production and
//! by in-memory trackers in tests.

use crate::domain::{IssueRecord, Result};
use async_trait::async_trait;

/// Trait for issue tracker query interfaces
///
/// # Example
///
/// ```no_run
/// use initiative_export::adapters::jira::{IssueTracker, JiraClient, Jql};
/// use initiative_export::config::JiraConfig;
///
/// # async fn example(config: &JiraConfig) -> initiative_export::domain::Result<()> {
/// let tracker = JiraClient::connect(config).await?;
/// let issues = tracker.search_issues(Jql::raw("project = ISDOP").as_str(), 50).await?;
/// println!("Found {} issues", issues.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Run a filter expression and return at most `max_results` issues in
    /// tracker order
    ///
    /// # Errors
    ///
    /// Returns a `Jira` error on transport failure, rejected query, or an
    /// undecodable response.
    async fn search_issues(&self, jql: &str, max_results: usize) -> Result<Vec<IssueRecord>>;

    /// Base URL of the tracker
    fn base_url(&self) -> &str;
}
