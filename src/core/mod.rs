//! Core business logic.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, row projection, batching and CSV output
//!
//! # Export Workflow
//!
//! 1. **Query parents**: all Business Initiatives of the configured project
//! 2. **Query children**: one query per parent, in tracker order
//! 3. **Project**: one row per child, or one placeholder row for a childless parent
//! 4. **Flush**: write a CSV file after every tenth parent and after the last
//! 5. **Report**: return the run statistics
//!
//! # Example
//!
//! ```rust,no_run
//! use initiative_export::config::load_config;
//! use initiative_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("initiative-export.toml")?;
//!
//! let mut coordinator = ExportCoordinator::connect(&config).await?;
//! let outcome = coordinator.execute_export().await?;
//!
//! let summary = outcome.summary();
//! println!("Parents: {}", summary.total_parents);
//! println!("Rows: {}", summary.total_rows);
//! println!("Files: {:?}", summary.file_names());
//! # Ok(())
//! # }
//! ```

pub mod export;
