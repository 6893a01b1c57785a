//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting run statistics.

use super::writer::WrittenFile;
use crate::domain::IssueKey;
use std::time::Duration;

/// Statistics for one export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Parents returned by the parent query
    pub total_parents: usize,

    /// Children across all parents
    pub total_children: usize,

    /// Rows produced, placeholder rows included
    pub total_rows: usize,

    /// Files written, in batch order
    pub files: Vec<WrittenFile>,

    /// Parents whose child query failed and were exported as childless
    pub degraded_parents: Vec<IssueKey>,

    /// Batch numbers whose file could not be written
    pub failed_batches: Vec<usize>,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_parents: 0,
            total_children: 0,
            total_rows: 0,
            files: Vec::new(),
            degraded_parents: Vec::new(),
            failed_batches: Vec::new(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Record a file that was written
    pub fn add_file(&mut self, file: WrittenFile) {
        self.files.push(file);
    }

    /// Record a parent whose children could not be fetched
    pub fn add_degraded_parent(&mut self, key: IssueKey, message: String) {
        self.add_error(
            ExportError::new(ExportErrorType::Query, message).with_context(format!("parent={key}")),
        );
        self.degraded_parents.push(key);
    }

    /// Record a batch whose file could not be written
    pub fn add_failed_batch(&mut self, batch_number: usize, message: String) {
        self.add_error(
            ExportError::new(ExportErrorType::Write, message)
                .with_context(format!("batch={batch_number}")),
        );
        self.failed_batches.push(batch_number);
    }

    /// Names of the produced files
    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(WrittenFile::file_name).collect()
    }

    /// Whether the given parent was exported from a failed child query
    pub fn is_degraded(&self, key: &IssueKey) -> bool {
        self.degraded_parents.contains(key)
    }

    /// Check if the export ran without any degradation
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_parents = self.total_parents,
            total_children = self.total_children,
            total_rows = self.total_rows,
            files = self.files.len(),
            degraded_parents = self.degraded_parents.len(),
            failed_batches = self.failed_batches.len(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// The parent query returned nothing; no files were written
    NoWork(ExportSummary),

    /// Every parent was processed
    Completed(ExportSummary),
}

impl ExportOutcome {
    /// Statistics of the run
    pub fn summary(&self) -> &ExportSummary {
        match self {
            ExportOutcome::NoWork(summary) | ExportOutcome::Completed(summary) => summary,
        }
    }

    /// Whether the run stopped early for lack of parents
    pub fn is_no_work(&self) -> bool {
        matches!(self, ExportOutcome::NoWork(_))
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// A tracker query failed and was treated as empty
    Query,
    /// A batch file could not be written
    Write,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., parent key, batch number)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
