//! Adapters for external systems
//!
//! - [`jira`] - Jira REST API query interface

pub mod jira;
