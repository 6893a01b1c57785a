//! Domain models and types.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`IssueKey`], [`ProjectKey`])
//! - **Issue records** ([`ParentIssue`], [`ChildIssue`]) and the export row shape ([`OutputRow`])
//! - **Error types** ([`ExporterError`], [`JiraError`], [`WriteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so an issue key cannot be passed where a project
//! key is expected, and both are validated before being placed into JQL:
//!
//! ```rust
//! use initiative_export::domain::{IssueKey, ProjectKey};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let project = ProjectKey::new("ISDOP")?;
//! let key = IssueKey::new("ISDOP-12")?;
//! assert_eq!(key.project(), Some(project.as_str()));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod issue;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ExporterError, JiraError, WriteError};
pub use ids::{IssueKey, ProjectKey};
pub use issue::{ChildIssue, ChildIssueBuilder, IssueRecord, OutputRow, ParentIssue};
pub use result::Result;
