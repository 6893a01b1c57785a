//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output with configurable log levels
//! - Optional JSON log files with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use initiative_export::config::LoggingConfig;
//! use initiative_export::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(project = "ISDOP", "Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log that a parent is about to be processed
///
/// # Example
///
/// ```no_run
/// use initiative_export::log_parent_progress;
///
/// log_parent_progress!(3, 23, "ISDOP-42");
/// ```
#[macro_export]
macro_rules! log_parent_progress {
    ($index:expr, $total:expr, $key:expr) => {
        tracing::info!(
            parent = %$key,
            index = $index,
            total = $total,
            "Processing parent {}/{}",
            $index,
            $total
        );
    };
}

/// Log that a batch file was written
///
/// # Example
///
/// ```no_run
/// use initiative_export::log_batch_flushed;
///
/// log_batch_flushed!(1, 46, "isdop_batch_1_20250610_090507.csv");
/// ```
#[macro_export]
macro_rules! log_batch_flushed {
    ($batch:expr, $rows:expr, $path:expr) => {
        tracing::info!(
            batch = $batch,
            rows = $rows,
            path = %$path,
            "Wrote batch file"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        crate::log_parent_progress!(1, 10, "ISDOP-1");
        crate::log_batch_flushed!(1, 2, "out.csv");
    }
}
