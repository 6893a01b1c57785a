//! Export coordinator - drives one export run
//!
//! Fetches the parent issues, then walks them in tracker order: fetch the
//! children of each, project them into rows, and hand a batch to the CSV
//! writer after every tenth parent and after the last one. Everything is
//! awaited in sequence; nothing is spawned.

use crate::adapters::jira::{IssueTracker, JiraClient, Jql};
use crate::config::ExporterConfig;
use crate::core::export::batch::{Batch, BatchAccumulator};
use crate::core::export::progress::{ExportProgress, ProgressCallback};
use crate::core::export::projector::project_rows;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportOutcome, ExportSummary};
use crate::core::export::writer::CsvBatchWriter;
use crate::domain::{ChildIssue, ExporterError, ParentIssue, ProjectKey, Result};
use std::sync::Arc;
use std::time::Instant;

/// Where the coordinator is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not started
    Idle,
    /// Running the parent query
    FetchingParents,
    /// Fetching and projecting children of one parent
    IteratingChildren,
    /// Writing a completed batch
    Flushing,
    /// Building the final statistics
    Summarizing,
    /// Finished early because there were no parents
    Done,
    /// Finished after processing every parent
    Terminal,
}

/// Export coordinator
pub struct ExportCoordinator {
    tracker: Arc<dyn IssueTracker>,
    writer: CsvBatchWriter,
    parent_project: ProjectKey,
    child_project: ProjectKey,
    parent_issue_type: String,
    max_parents: usize,
    max_children: usize,
    state: DriverState,
    progress: Option<ProgressCallback>,
}

impl ExportCoordinator {
    /// Create a coordinator over an already connected tracker
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if a configured project key is invalid.
    pub fn new(config: &ExporterConfig, tracker: Arc<dyn IssueTracker>) -> Result<Self> {
        let query = &config.jira.query;
        let parent_project =
            ProjectKey::new(query.project.as_str()).map_err(ExporterError::Configuration)?;
        let child_project =
            ProjectKey::new(query.child_project()).map_err(ExporterError::Configuration)?;

        Ok(Self {
            tracker,
            writer: CsvBatchWriter::from_config(&config.export),
            parent_project,
            child_project,
            parent_issue_type: query.parent_issue_type.clone(),
            max_parents: query.max_parents,
            max_children: query.max_children,
            state: DriverState::Idle,
            progress: None,
        })
    }

    /// Report every processed parent and written file to `callback`
    pub fn on_progress(
        mut self,
        callback: impl Fn(&ExportProgress) + Send + Sync + 'static,
    ) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Connect to Jira and create a coordinator over the live client
    ///
    /// # Errors
    ///
    /// Connection and authentication failures are returned as-is; they are
    /// the only errors that stop a run before it starts.
    pub async fn connect(config: &ExporterConfig) -> Result<Self> {
        let client = JiraClient::connect(&config.jira).await?;
        Self::new(config, Arc::new(client))
    }

    /// Current state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Execute the export
    ///
    /// A failed parent query counts as zero parents. A failed child query
    /// exports that parent with a placeholder row. A failed write drops that
    /// batch's file. All three are recorded in the summary and the run goes
    /// on.
    ///
    /// # Errors
    ///
    /// Returns an `Export` error if this coordinator has already run.
    pub async fn execute_export(&mut self) -> Result<ExportOutcome> {
        if self.state != DriverState::Idle {
            return Err(ExporterError::Export(format!(
                "Export already executed (state: {:?})",
                self.state
            )));
        }

        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            project = %self.parent_project,
            issue_type = %self.parent_issue_type,
            "Starting export process"
        );

        self.transition(DriverState::FetchingParents);
        let parents = self.fetch_parents(&mut summary).await;
        summary.total_parents = parents.len();

        if parents.is_empty() {
            tracing::warn!(
                project = %self.parent_project,
                issue_type = %self.parent_issue_type,
                "No parent issues found - nothing to export"
            );
            self.transition(DriverState::Done);
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(ExportOutcome::NoWork(summary));
        }

        tracing::info!(count = parents.len(), "Fetched parent issues");

        let total = parents.len();
        let mut accumulator = BatchAccumulator::new();

        for (offset, parent) in parents.iter().enumerate() {
            let index = offset + 1;
            self.transition(DriverState::IteratingChildren);
            crate::log_parent_progress!(index, total, parent.key);
            self.emit(ExportProgress::ParentStarted {
                index,
                total,
                key: parent.key.clone(),
            });

            let children = self.fetch_children(parent, &mut summary).await;
            summary.total_children += children.len();

            let rows = project_rows(parent, &children);
            summary.total_rows += rows.len();
            accumulator.append(rows);

            if accumulator.should_flush(index, total) {
                self.transition(DriverState::Flushing);
                let batch = accumulator.take_batch();
                self.flush(&batch, &mut summary);
            }
        }

        self.transition(DriverState::Summarizing);
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        self.transition(DriverState::Terminal);

        Ok(ExportOutcome::Completed(summary))
    }

    async fn fetch_parents(&self, summary: &mut ExportSummary) -> Vec<ParentIssue> {
        let jql = Jql::parents_of_type(&self.parent_project, &self.parent_issue_type);

        match self
            .tracker
            .search_issues(jql.as_str(), self.max_parents)
            .await
        {
            Ok(records) => records.into_iter().map(ParentIssue::from).collect(),
            Err(e) => {
                tracing::error!(jql = %jql, error = %e, "Parent query failed");
                summary.add_error(
                    ExportError::new(ExportErrorType::Query, format!("Parent query failed: {e}"))
                        .with_context(format!("project={}", self.parent_project)),
                );
                Vec::new()
            }
        }
    }

    async fn fetch_children(
        &self,
        parent: &ParentIssue,
        summary: &mut ExportSummary,
    ) -> Vec<ChildIssue> {
        let jql = Jql::children_of(&self.child_project, &parent.key);

        match self
            .tracker
            .search_issues(jql.as_str(), self.max_children)
            .await
        {
            Ok(records) => {
                tracing::info!(
                    parent = %parent.key,
                    count = records.len(),
                    "Fetched child issues"
                );
                self.emit(ExportProgress::ChildrenFetched {
                    parent: parent.key.clone(),
                    count: records.len(),
                    failed: false,
                });
                records.into_iter().map(ChildIssue::from).collect()
            }
            Err(e) => {
                tracing::warn!(
                    parent = %parent.key,
                    error = %e,
                    "Child query failed - exporting parent without children"
                );
                self.emit(ExportProgress::ChildrenFetched {
                    parent: parent.key.clone(),
                    count: 0,
                    failed: true,
                });
                summary.add_degraded_parent(parent.key.clone(), e.to_string());
                Vec::new()
            }
        }
    }

    fn flush(&self, batch: &Batch, summary: &mut ExportSummary) {
        match self.writer.write(batch) {
            Ok(file) => {
                crate::log_batch_flushed!(file.batch_number, file.rows, file.path.display());
                self.emit(ExportProgress::BatchWritten(file.clone()));
                summary.add_file(file);
            }
            Err(e) => {
                tracing::error!(
                    batch = batch.number,
                    rows = batch.rows.len(),
                    error = %e,
                    "Failed to write batch file"
                );
                self.emit(ExportProgress::BatchFailed {
                    batch_number: batch.number,
                    message: e.to_string(),
                });
                summary.add_failed_batch(batch.number, e.to_string());
            }
        }
    }

    fn emit(&self, event: ExportProgress) {
        if let Some(callback) = &self.progress {
            callback(&event);
        }
    }

    fn transition(&mut self, next: DriverState) {
        tracing::trace!(from = ?self.state, to = ?next, "Driver state change");
        self.state = next;
    }
}
