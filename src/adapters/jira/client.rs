//! Jira REST API client
//!
//! Talks to Jira Server/Data Center REST API v2 with a personal access token
//! sent as a bearer credential. Every call is awaited to completion by the
//! caller; the client does not retry.

use super::models::{ErrorCollection, SearchRequest, SearchResponse, ServerInfo, SEARCH_FIELDS};
use super::tracker::IssueTracker;
use crate::config::JiraConfig;
use crate::domain::{ExporterError, IssueRecord, JiraError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Jira client
///
/// # Example
///
/// ```no_run
/// use initiative_export::adapters::jira::{IssueTracker, JiraClient};
/// use initiative_export::config::load_config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("initiative-export.toml")?;
/// let client = JiraClient::connect(&config.jira).await?;
/// println!("Connected to {}", client.base_url());
/// # Ok(())
/// # }
/// ```
pub struct JiraClient {
    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client with the authorization header preset
    client: Client,
}

impl JiraClient {
    /// Build a client without contacting the server
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the token is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.token.expose_secret().as_str()
        ))
        .map_err(|e| ExporterError::Configuration(format!("Invalid jira.token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut client_builder = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for Jira");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            ExporterError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.trimmed_base_url().to_string(),
            client,
        })
    }

    /// Build a client and verify the server accepts the token
    ///
    /// # Errors
    ///
    /// Any failure here means the run cannot start: the server is
    /// unreachable, the token is rejected, or the response is not Jira's.
    pub async fn connect(config: &JiraConfig) -> Result<Self> {
        let client = Self::new(config)?;
        let info = client.server_info().await?;

        tracing::info!(
            base_url = %client.base_url,
            version = info.version.as_deref().unwrap_or("unknown"),
            server_title = info.server_title.as_deref().unwrap_or("unknown"),
            "Connected to Jira"
        );

        Ok(client)
    }

    /// `GET /rest/api/2/serverInfo`
    pub async fn server_info(&self) -> Result<ServerInfo> {
        let url = format!("{}/rest/api/2/serverInfo", self.base_url);
        let response = self.client.get(&url).send().await.map_err(send_error)?;
        let response = check_status(response).await?;

        response
            .json::<ServerInfo>()
            .await
            .map_err(|e| JiraError::InvalidResponse(e.to_string()).into())
    }

    async fn search_page(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<SearchResponse> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let body = SearchRequest {
            jql,
            start_at,
            max_results,
            fields: &SEARCH_FIELDS,
        };

        tracing::debug!(jql = %jql, start_at, max_results, "Executing JQL search");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;
        let response = check_status(response).await?;

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| JiraError::InvalidResponse(e.to_string()).into())
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search_issues(&self, jql: &str, max_results: usize) -> Result<Vec<IssueRecord>> {
        let mut issues: Vec<IssueRecord> = Vec::new();
        let mut start_at = 0;

        // The server may return fewer issues per page than asked for.
        while issues.len() < max_results {
            let page = self
                .search_page(jql, start_at, max_results - issues.len())
                .await?;
            let page_len = page.issues.len();

            for issue in page.issues {
                issues.push(issue.into_record(&self.base_url)?);
            }

            start_at += page_len;
            if page_len == 0 || start_at >= page.total {
                break;
            }
        }

        issues.truncate(max_results);
        Ok(issues)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn send_error(err: reqwest::Error) -> ExporterError {
    if err.is_timeout() {
        JiraError::Timeout(err.to_string()).into()
    } else {
        JiraError::ConnectionFailed(err.to_string()).into()
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body).into())
}

fn status_error(status: StatusCode, body: &str) -> JiraError {
    let message = ErrorCollection::message_from_body(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            JiraError::AuthenticationFailed(format!("{status}: {message}"))
        }
        StatusCode::BAD_REQUEST => JiraError::QueryFailed(message),
        s if s.is_server_error() => JiraError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => JiraError::ClientError {
            status: s.as_u16(),
            message,
        },
    }
}
