//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! Errors are domain-specific and don't expose third-party types, with the
//! exception of `std::io::Error` carried as the source of a [`WriteError`].

use std::path::PathBuf;
use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Issue tracker errors
    #[error("Jira error: {0}")]
    Jira(#[from] JiraError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExporterError {
    /// Whether this error means the tracker could not be reached at all.
    ///
    /// Only these abort a run; everything else degrades at its call site.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ExporterError::Jira(JiraError::ConnectionFailed(_))
                | ExporterError::Jira(JiraError::AuthenticationFailed(_))
                | ExporterError::Jira(JiraError::Timeout(_))
        )
    }
}

/// Jira-specific errors
///
/// Errors that occur when talking to the Jira REST API.
/// These errors don't expose the HTTP client types.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Failed to reach the Jira server
    #[error("Failed to connect to Jira: {0}")]
    ConnectionFailed(String),

    /// Token rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// JQL query rejected or failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Failure to produce one batch file
#[derive(Debug, Error)]
pub enum WriteError {
    /// The file could not be created, written or flushed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV encoder rejected a record
    #[error("failed to encode CSV record for {}: {message}", path.display())]
    Csv { path: PathBuf, message: String },
}

impl WriteError {
    /// Path of the file that was being written
    pub fn path(&self) -> &PathBuf {
        match self {
            WriteError::Io { path, .. } | WriteError::Csv { path, .. } => path,
        }
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}
