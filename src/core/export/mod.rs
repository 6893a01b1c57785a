//! Export pipeline
//!
//! This module provides the core export logic, including:
//! - Row projection of parents and their children
//! - Batch accumulation and CSV file writing
//! - Export coordination, progress events and run statistics

pub mod batch;
pub mod coordinator;
pub mod progress;
pub mod projector;
pub mod summary;
pub mod writer;

pub use batch::{Batch, BatchAccumulator, PARENTS_PER_BATCH};
pub use coordinator::{DriverState, ExportCoordinator};
pub use progress::{ExportProgress, ProgressCallback};
pub use projector::{format_date, project_rows};
pub use summary::{ExportError, ExportErrorType, ExportOutcome, ExportSummary};
pub use writer::{CsvBatchWriter, WrittenFile, CSV_HEADER};
