//! Jira adapter implementation
//!
//! This module provides the integration with Jira: the [`IssueTracker`]
//! trait the export pipeline depends on, the REST client implementing it,
//! JQL builders and the API models.

pub mod client;
pub mod jql;
pub mod models;
pub mod tracker;

pub use client::JiraClient;
pub use jql::Jql;
pub use tracker::IssueTracker;
