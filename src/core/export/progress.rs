//! Per-parent and per-file progress of a run
//!
//! The coordinator reports each step to an optional callback. The `export`
//! command prints them to stdout; library callers can collect or ignore them.

use super::writer::WrittenFile;
use crate::domain::IssueKey;
use std::fmt;

/// One step of an export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportProgress {
    /// A parent is about to be processed (`index` is 1-based)
    ParentStarted {
        index: usize,
        total: usize,
        key: IssueKey,
    },
    /// The child query for a parent returned
    ChildrenFetched {
        parent: IssueKey,
        count: usize,
        /// The query failed and the parent is exported with a placeholder row
        failed: bool,
    },
    /// A batch file was written
    BatchWritten(WrittenFile),
    /// A batch could not be written and no file was kept
    BatchFailed { batch_number: usize, message: String },
}

/// Callback receiving progress events
pub type ProgressCallback = Box<dyn Fn(&ExportProgress) + Send + Sync>;

impl fmt::Display for ExportProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportProgress::ParentStarted { index, total, key } => {
                write!(f, "Processing {index}/{total}: {key}")
            }
            ExportProgress::ChildrenFetched {
                parent,
                failed: true,
                ..
            } => write!(f, "  └─ {parent}: child query failed, exporting placeholder row"),
            ExportProgress::ChildrenFetched { parent, count, .. } => {
                write!(f, "  └─ {parent}: {count} child issues")
            }
            ExportProgress::BatchWritten(file) => write!(
                f,
                "💾 Created {} ({} rows, {} bytes)",
                file.file_name(),
                file.rows,
                file.bytes
            ),
            ExportProgress::BatchFailed {
                batch_number,
                message,
            } => write!(f, "❌ Batch {batch_number} not written: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(k: &str) -> IssueKey {
        IssueKey::new(k).unwrap()
    }

    #[test]
    fn test_parent_lines() {
        let started = ExportProgress::ParentStarted {
            index: 3,
            total: 23,
            key: key("ISDOP-42"),
        };
        assert_eq!(started.to_string(), "Processing 3/23: ISDOP-42");

        let fetched = ExportProgress::ChildrenFetched {
            parent: key("ISDOP-42"),
            count: 2,
            failed: false,
        };
        assert_eq!(fetched.to_string(), "  └─ ISDOP-42: 2 child issues");

        let failed = ExportProgress::ChildrenFetched {
            parent: key("ISDOP-7"),
            count: 0,
            failed: true,
        };
        assert!(failed.to_string().contains("ISDOP-7: child query failed"));
    }

    #[test]
    fn test_file_lines() {
        let written = ExportProgress::BatchWritten(WrittenFile {
            path: PathBuf::from("out/isdop_batch_1_20250610_090507.csv"),
            batch_number: 1,
            rows: 20,
            parent_count: 10,
            bytes: 2048,
        });
        assert_eq!(
            written.to_string(),
            "💾 Created isdop_batch_1_20250610_090507.csv (20 rows, 2048 bytes)"
        );

        let failed = ExportProgress::BatchFailed {
            batch_number: 2,
            message: "disk full".to_string(),
        };
        assert_eq!(failed.to_string(), "❌ Batch 2 not written: disk full");
    }
}
