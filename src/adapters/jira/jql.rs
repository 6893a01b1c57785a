//! JQL filter expressions
//!
//! Only two shapes are needed by the export: all parents of an issue type in a
//! project, and all children of one parent. Both take validated identifiers so
//! the values cannot alter the structure of the query.

use crate::domain::ids::{IssueKey, ProjectKey};
use std::fmt;

/// A JQL query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jql(String);

impl Jql {
    /// Wrap a caller-supplied query as-is
    pub fn raw(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    /// `project = <PROJECT> AND issuetype = "<TYPE>"`
    ///
    /// `issue_type` must not contain `"`; configuration validation enforces this.
    ///
    /// # Example
    ///
    /// ```
    /// use initiative_export::adapters::jira::Jql;
    /// use initiative_export::domain::ProjectKey;
    ///
    /// let project = ProjectKey::new("ISDOP").unwrap();
    /// let jql = Jql::parents_of_type(&project, "Business Initiative");
    /// assert_eq!(jql.as_str(), r#"project = ISDOP AND issuetype = "Business Initiative""#);
    /// ```
    pub fn parents_of_type(project: &ProjectKey, issue_type: &str) -> Self {
        Self(format!(
            "project = {project} AND issuetype = \"{issue_type}\""
        ))
    }

    /// `project = <PROJECT> AND issuekey in childIssuesOf("<KEY>")`
    pub fn children_of(project: &ProjectKey, parent: &IssueKey) -> Self {
        Self(format!(
            "project = {project} AND issuekey in childIssuesOf(\"{parent}\")"
        ))
    }

    /// The query text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Jql {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
