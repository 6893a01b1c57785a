//! Issue records as seen by the export pipeline
//!
//! These are read-only snapshots taken from the tracker for the duration of
//! one run. They carry only the fields the CSV export and the `children`
//! listing need.

use super::ids::IssueKey;
use serde::{Deserialize, Serialize};

/// An issue as returned by a tracker search, before it is given a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub key: IssueKey,
    pub summary: String,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    pub url: String,
    pub created: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
}

impl From<IssueRecord> for ParentIssue {
    fn from(record: IssueRecord) -> Self {
        ParentIssue::new(record.key, record.summary)
    }
}

impl From<IssueRecord> for ChildIssue {
    fn from(record: IssueRecord) -> Self {
        ChildIssue {
            key: record.key,
            summary: record.summary,
            status: record.status.unwrap_or_default(),
            issue_type: record.issue_type.unwrap_or_default(),
            url: record.url,
            created: record.created,
            assignee: record.assignee,
            priority: record.priority,
        }
    }
}

/// A top-level work item whose children are enumerated (a Business Initiative)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentIssue {
    /// Issue key, unique within the run
    pub key: IssueKey,

    /// Issue summary (title)
    pub summary: String,
}

impl ParentIssue {
    /// Create a new parent issue
    pub fn new(key: IssueKey, summary: impl Into<String>) -> Self {
        Self {
            key,
            summary: summary.into(),
        }
    }
}

/// A work item linked beneath a parent in the tracker hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildIssue {
    /// Issue key
    pub key: IssueKey,

    /// Issue summary (title)
    pub summary: String,

    /// Workflow status name
    pub status: String,

    /// Issue type name
    pub issue_type: String,

    /// Permanent browse URL
    pub url: String,

    /// Raw creation timestamp as returned by the tracker
    pub created: Option<String>,

    /// Assignee display name
    pub assignee: Option<String>,

    /// Priority name
    pub priority: Option<String>,
}

impl ChildIssue {
    /// Create a new child issue builder
    pub fn builder(key: IssueKey) -> ChildIssueBuilder {
        ChildIssueBuilder::new(key)
    }
}

/// Builder for [`ChildIssue`]
#[derive(Debug, Clone)]
pub struct ChildIssueBuilder {
    issue: ChildIssue,
}

impl ChildIssueBuilder {
    /// Start a builder for the given key; text fields default to empty
    pub fn new(key: IssueKey) -> Self {
        Self {
            issue: ChildIssue {
                key,
                summary: String::new(),
                status: String::new(),
                issue_type: String::new(),
                url: String::new(),
                created: None,
                assignee: None,
                priority: None,
            },
        }
    }

    /// Set the summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.issue.summary = summary.into();
        self
    }

    /// Set the status name
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.issue.status = status.into();
        self
    }

    /// Set the issue type name
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue.issue_type = issue_type.into();
        self
    }

    /// Set the browse URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.issue.url = url.into();
        self
    }

    /// Set the raw creation timestamp
    pub fn created(mut self, created: impl Into<String>) -> Self {
        self.issue.created = Some(created.into());
        self
    }

    /// Set the assignee display name
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.issue.assignee = Some(assignee.into());
        self
    }

    /// Set the priority name
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.issue.priority = Some(priority.into());
        self
    }

    /// Finish building
    pub fn build(self) -> ChildIssue {
        self.issue
    }
}

/// One line of an export file
///
/// The field order is the column order of the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub parent_key: String,
    pub parent_summary: String,
    pub child_key: String,
    pub child_summary: String,
    pub child_status: String,
    pub child_type: String,
    pub child_url: String,
    pub created: String,
}

impl OutputRow {
    /// Number of columns in every row
    pub const WIDTH: usize = 8;

    /// Fields in column order
    pub fn as_record(&self) -> [&str; Self::WIDTH] {
        [
            self.parent_key.as_str(),
            self.parent_summary.as_str(),
            self.child_key.as_str(),
            self.child_summary.as_str(),
            self.child_status.as_str(),
            self.child_type.as_str(),
            self.child_url.as_str(),
            self.created.as_str(),
        ]
    }
}
