//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use initiative_export::adapters::jira::IssueTracker;
use initiative_export::config::{
    secret_string, ExportConfig, ExporterConfig, JiraConfig, QueryConfig,
};
use initiative_export::domain::{IssueKey, IssueRecord, JiraError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

pub const BASE_URL: &str = "https://jira.example.com";
pub const CREATED: &str = "2025-06-10T14:30:00.000+0000";

/// In-memory tracker answering the two query shapes used by an export
///
/// Child queries are recognised by their `childIssuesOf("<KEY>")` clause.
#[derive(Default)]
pub struct FakeTracker {
    parents: Vec<IssueRecord>,
    children: HashMap<String, Vec<IssueRecord>>,
    failing_parents: HashSet<String>,
    fail_parent_query: bool,
    queries: Mutex<Vec<(String, usize)>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` parents `ISDOP-1..=ISDOP-count`, each with `children_each`
    /// children
    pub fn with_parents(count: usize, children_each: usize) -> Self {
        let mut tracker = Self::new();
        for i in 1..=count {
            let key = format!("ISDOP-{i}");
            let children = (1..=children_each)
                .map(|c| issue(&format!("DEV-{}", i * 100 + c)))
                .collect();
            tracker = tracker.parent(issue(&key), children);
        }
        tracker
    }

    pub fn parent(mut self, parent: IssueRecord, children: Vec<IssueRecord>) -> Self {
        self.children
            .insert(parent.key.as_str().to_string(), children);
        self.parents.push(parent);
        self
    }

    /// Make the child query of `key` fail
    pub fn failing_children_of(mut self, key: &str) -> Self {
        self.failing_parents.insert(key.to_string());
        self
    }

    /// Make the parent query fail
    pub fn failing_parent_query(mut self) -> Self {
        self.fail_parent_query = true;
        self
    }

    /// Every query received, with its result cap
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn search_issues(&self, jql: &str, max_results: usize) -> Result<Vec<IssueRecord>> {
        self.queries
            .lock()
            .unwrap()
            .push((jql.to_string(), max_results));

        let records = match child_query_key(jql) {
            Some(key) => {
                if self.failing_parents.contains(key) {
                    return Err(JiraError::ServerError {
                        status: 500,
                        message: format!("child query for {key} failed"),
                    }
                    .into());
                }
                self.children.get(key).cloned().unwrap_or_default()
            }
            None => {
                if self.fail_parent_query {
                    return Err(JiraError::QueryFailed("bad JQL".to_string()).into());
                }
                self.parents.clone()
            }
        };

        Ok(records.into_iter().take(max_results).collect())
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }
}

fn child_query_key(jql: &str) -> Option<&str> {
    let start = jql.find("childIssuesOf(\"")? + "childIssuesOf(\"".len();
    let end = jql[start..].find('"')? + start;
    Some(&jql[start..end])
}

/// A record with a generated summary
pub fn issue(key: &str) -> IssueRecord {
    IssueRecord {
        key: IssueKey::new(key).unwrap(),
        summary: Sentence(2..6).fake(),
        status: Some("Open".to_string()),
        issue_type: Some("Epic".to_string()),
        url: format!("{BASE_URL}/browse/{key}"),
        created: Some(CREATED.to_string()),
        assignee: None,
        priority: None,
    }
}

/// Configuration writing into `output_dir`
pub fn config_for(output_dir: &Path) -> ExporterConfig {
    ExporterConfig {
        application: Default::default(),
        jira: JiraConfig {
            base_url: BASE_URL.to_string(),
            token: secret_string("test-token".to_string()),
            timeout_seconds: 5,
            tls_verify: true,
            query: QueryConfig {
                project: "ISDOP".to_string(),
                ..Default::default()
            },
        },
        export: ExportConfig {
            output_dir: output_dir.to_string_lossy().into_owned(),
            file_prefix: "isdop_batch".to_string(),
        },
        logging: Default::default(),
    }
}

/// All records of a CSV file, header excluded
pub fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}
