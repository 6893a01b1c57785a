// Initiative Export - Jira Business Initiative to CSV exporter
// Copyright (c) 2025 Initiative Export Contributors
// Licensed under the MIT License

//! # Initiative Export
//!
//! Exports Jira "Business Initiative" issues together with their child issues
//! into batched CSV files for reporting.
//!
//! ## Overview
//!
//! One run:
//! - **Queries** all parent issues of the configured type in a project
//! - **Queries** the children of each parent, in tracker order
//! - **Projects** each parent and child pair into an 8-column row, with one
//!   placeholder row for a parent without children
//! - **Writes** a timestamped CSV file after every 10 parents
//! - **Reports** counts, file names and file sizes
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline (projection, batching, CSV output, coordination)
//! - [`adapters`] - Jira REST client behind the [`adapters::jira::IssueTracker`] trait
//! - [`domain`] - Issue types, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use initiative_export::config::load_config;
//! use initiative_export::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("initiative-export.toml")?;
//!
//!     let mut coordinator = ExportCoordinator::connect(&config).await?;
//!     let outcome = coordinator.execute_export().await?;
//!
//!     for name in outcome.summary().file_names() {
//!         println!("Wrote {name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only a failed connection at startup stops a run. A failed query is logged
//! and treated as an empty result, and a failed file write loses that batch's
//! file. Both are recorded in the [`core::export::ExportSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
