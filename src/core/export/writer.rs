//! CSV batch files
//!
//! Each batch becomes one UTF-8 CSV file named
//! `<prefix>_<batch>_<YYYYMMDD_HHMMSS>.csv` in the output directory.

use super::batch::Batch;
use crate::config::ExportConfig;
use crate::domain::{OutputRow, WriteError};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Header row of every export file
pub const CSV_HEADER: [&str; OutputRow::WIDTH] = [
    "Business Initiative",
    "BI Summary",
    "Child Issue Key",
    "Summary",
    "Status",
    "Issue Type",
    "URL",
    "Create Date",
];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A batch file that was written successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub batch_number: usize,
    pub rows: usize,
    pub parent_count: usize,
    /// Size on disk after the write
    pub bytes: u64,
}

impl WrittenFile {
    /// File name without the directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Writes batches as CSV files
#[derive(Debug, Clone)]
pub struct CsvBatchWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl CsvBatchWriter {
    /// Create a writer for `output_dir` using `prefix` for file names
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a writer from the `[export]` section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir, &config.file_prefix)
    }

    /// Directory files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<prefix>_<batch>_<YYYYMMDD_HHMMSS>.csv`
    pub fn file_name(&self, batch_number: usize, timestamp: &DateTime<Local>) -> String {
        format!(
            "{}_{}_{}.csv",
            self.prefix,
            batch_number,
            timestamp.format(TIMESTAMP_FORMAT)
        )
    }

    /// Write one batch to a new file stamped with the current local time
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the file cannot be created, written,
    /// flushed or read back. A partially written file is removed before the
    /// error is returned.
    pub fn write(&self, batch: &Batch) -> Result<WrittenFile, WriteError> {
        self.write_at(batch, &Local::now())
    }

    /// Write one batch using an explicit timestamp for the file name
    pub fn write_at(
        &self,
        batch: &Batch,
        timestamp: &DateTime<Local>,
    ) -> Result<WrittenFile, WriteError> {
        let path = self
            .output_dir
            .join(self.file_name(batch.number, timestamp));

        let bytes = write_or_discard(&path, |file| {
            let mut writer = WriterBuilder::new()
                .quote_style(QuoteStyle::Necessary)
                .terminator(Terminator::CRLF)
                .from_writer(file);

            writer
                .write_record(CSV_HEADER)
                .map_err(|e| csv_error(&path, e))?;
            for row in &batch.rows {
                writer
                    .write_record(row.as_record())
                    .map_err(|e| csv_error(&path, e))?;
            }
            writer.flush().map_err(|source| WriteError::Io {
                path: path.clone(),
                source,
            })?;
            drop(writer);

            fs::metadata(&path)
                .map(|m| m.len())
                .map_err(|source| WriteError::Io {
                    path: path.clone(),
                    source,
                })
        })?;

        Ok(WrittenFile {
            path,
            batch_number: batch.number,
            rows: batch.rows.len(),
            parent_count: batch.parent_count,
            bytes,
        })
    }
}

/// Create `path` and hand it to `write`; on failure the file is removed
fn write_or_discard<T>(
    path: &Path,
    write: impl FnOnce(File) -> Result<T, WriteError>,
) -> Result<T, WriteError> {
    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write(file).inspect_err(|_| {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partially written batch file"
            );
        }
    })
}

fn csv_error(path: &Path, err: csv::Error) -> WriteError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => WriteError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => WriteError::Csv {
            path: path.to_path_buf(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn row(parent: &str, child_summary: &str) -> OutputRow {
        OutputRow {
            parent_key: parent.to_string(),
            parent_summary: "Portal, phase 2".to_string(),
            child_key: format!("{parent}-1"),
            child_summary: child_summary.to_string(),
            child_status: "Open".to_string(),
            child_type: "Epic".to_string(),
            child_url: "https://jira.example.com/browse/X-1".to_string(),
            created: "2025-06-10 14:30:00".to_string(),
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 10, 9, 5, 7).unwrap()
    }

    #[test]
    fn test_file_name_format() {
        let writer = CsvBatchWriter::new(".", "isdop_batch");
        assert_eq!(
            writer.file_name(3, &fixed_time()),
            "isdop_batch_3_20250610_090507.csv"
        );
    }

    #[test]
    fn test_write_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let writer = CsvBatchWriter::new(dir.path(), "isdop_batch");
        let batch = Batch {
            number: 1,
            rows: vec![row("ISDOP-1", "plain"), row("ISDOP-2", "say \"hi\"\nthen leave")],
            parent_count: 2,
        };

        let written = writer.write_at(&batch, &fixed_time()).unwrap();

        assert_eq!(written.file_name(), "isdop_batch_1_20250610_090507.csv");
        assert_eq!(written.rows, 2);
        assert_eq!(written.parent_count, 2);
        assert_eq!(written.bytes, fs::metadata(&written.path).unwrap().len());

        let content = fs::read_to_string(&written.path).unwrap();
        assert!(content.starts_with(
            "Business Initiative,BI Summary,Child Issue Key,Summary,Status,Issue Type,URL,Create Date\r\n"
        ));
        assert!(content.contains("ISDOP-1,\"Portal, phase 2\",ISDOP-1-1,plain,Open,Epic,"));
        assert!(content.contains("\"say \"\"hi\"\"\nthen leave\""));

        let mut reader = csv::Reader::from_path(&written.path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][3], "say \"hi\"\nthen leave");
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("isdop_batch_1_20250610_090507.csv");

        let result: Result<(), WriteError> = write_or_discard(&path, |mut file| {
            use std::io::Write;
            file.write_all(b"Business Initiative,BI Summary\r\nISDOP-1,")
                .unwrap();
            file.flush().unwrap();
            assert!(path.exists());
            Err(WriteError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        });

        assert!(matches!(result, Err(WriteError::Io { .. })));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let writer = CsvBatchWriter::new(&missing, "isdop_batch");
        let batch = Batch {
            number: 1,
            rows: vec![row("ISDOP-1", "x")],
            parent_count: 1,
        };

        let err = writer.write(&batch).unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
        assert!(err.path().starts_with(&missing));
    }
}
