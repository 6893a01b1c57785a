//! Jira REST API v2 models
//!
//! Request and response structures for `/rest/api/2/search` and
//! `/rest/api/2/serverInfo`. They are kept separate from the domain types and
//! converted with [`JiraIssue::into_record`].

use crate::domain::errors::JiraError;
use crate::domain::ids::IssueKey;
use crate::domain::issue::IssueRecord;
use serde::{Deserialize, Serialize};

/// Fields requested for every issue
pub const SEARCH_FIELDS: [&str; 6] = [
    "summary",
    "status",
    "issuetype",
    "created",
    "assignee",
    "priority",
];

/// Body of `POST /rest/api/2/search`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub start_at: usize,
    pub max_results: usize,
    pub fields: &'a [&'a str],
}

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub max_results: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// An issue in a search response
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub assignee: Option<UserField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
}

/// Status, issue type and priority all carry a `name`
#[derive(Debug, Clone, Deserialize)]
pub struct NamedField {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserField {
    pub display_name: String,
}

impl JiraIssue {
    /// Convert to an [`IssueRecord`], building the permalink from `base_url`
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the key is not a valid issue key.
    pub fn into_record(self, base_url: &str) -> Result<IssueRecord, JiraError> {
        let key = IssueKey::new(self.key).map_err(JiraError::InvalidResponse)?;
        let url = permalink(base_url, &key);
        let fields = self.fields;

        Ok(IssueRecord {
            key,
            summary: fields.summary.unwrap_or_default(),
            status: fields.status.map(|s| s.name),
            issue_type: fields.issuetype.map(|t| t.name),
            url,
            created: fields.created,
            assignee: fields.assignee.map(|a| a.display_name),
            priority: fields.priority.map(|p| p.name),
        })
    }
}

/// `<base_url>/browse/<KEY>`
pub fn permalink(base_url: &str, key: &IssueKey) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

/// Response of `GET /rest/api/2/serverInfo`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub server_title: Option<String>,
}

/// Error body returned by Jira on 4xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCollection {
    #[serde(default)]
    pub error_messages: Vec<String>,
}

impl ErrorCollection {
    /// Best-effort human readable message from a response body
    pub fn message_from_body(body: &str) -> String {
        match serde_json::from_str::<ErrorCollection>(body) {
            Ok(errors) if !errors.error_messages.is_empty() => errors.error_messages.join("; "),
            _ => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialization() {
        let body = r#"{
            "startAt": 0,
            "maxResults": 50,
            "total": 1,
            "issues": [{
                "id": "10001",
                "key": "ISDOP-5",
                "self": "https://jira.example.com/rest/api/2/issue/10001",
                "fields": {
                    "summary": "Customer portal",
                    "status": {"name": "In Progress", "id": "3"},
                    "issuetype": {"name": "Epic"},
                    "created": "2025-06-10T14:30:00.000+0000",
                    "assignee": null,
                    "priority": {"name": "High"}
                }
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.issues.len(), 1);

        let record = response.issues[0]
            .clone()
            .into_record("https://jira.example.com/")
            .unwrap();
        assert_eq!(record.key.as_str(), "ISDOP-5");
        assert_eq!(record.status.as_deref(), Some("In Progress"));
        assert_eq!(record.issue_type.as_deref(), Some("Epic"));
        assert_eq!(record.assignee, None);
        assert_eq!(record.priority.as_deref(), Some("High"));
        assert_eq!(record.url, "https://jira.example.com/browse/ISDOP-5");
    }

    #[test]
    fn test_missing_fields_tolerated() {
        let issue: JiraIssue = serde_json::from_str(r#"{"key": "A-1"}"#).unwrap();
        let record = issue.into_record("http://jira").unwrap();
        assert_eq!(record.summary, "");
        assert!(record.created.is_none());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let issue: JiraIssue = serde_json::from_str(r#"{"key": ""}"#).unwrap();
        assert!(matches!(
            issue.into_record("http://jira"),
            Err(JiraError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_search_request_serialization() {
        let request = SearchRequest {
            jql: "project = ISDOP",
            start_at: 50,
            max_results: 25,
            fields: &SEARCH_FIELDS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startAt"], 50);
        assert_eq!(json["maxResults"], 25);
        assert_eq!(json["fields"][0], "summary");
    }

    #[test]
    fn test_error_collection_message() {
        let body = r#"{"errorMessages":["The value 'NOPE' does not exist for the field 'project'."],"errors":{}}"#;
        assert_eq!(
            ErrorCollection::message_from_body(body),
            "The value 'NOPE' does not exist for the field 'project'."
        );
        assert_eq!(ErrorCollection::message_from_body("  plain "), "plain");
    }
}
