//! Domain identifier types with validation
//!
//! Newtype wrappers for Jira identifiers. Both end up interpolated into JQL,
//! so construction rejects characters that would break out of the query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Jira issue key newtype wrapper
///
/// Represents the human-readable key of an issue, e.g. `ISDOP-42`.
///
/// # Examples
///
/// ```
/// use initiative_export::domain::ids::IssueKey;
/// use std::str::FromStr;
///
/// let key = IssueKey::from_str("ISDOP-42").unwrap();
/// assert_eq!(key.as_str(), "ISDOP-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueKey(String);

impl IssueKey {
    /// Creates a new IssueKey from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(IssueKey)` if the key is non-empty and contains no
    /// whitespace or double quotes, `Err` otherwise
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("Issue key cannot be empty".to_string());
        }
        if key.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(format!("Invalid issue key '{key}'"));
        }
        Ok(Self(key))
    }

    /// Returns the issue key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Project part of the key (before the last `-`)
    pub fn project(&self) -> Option<&str> {
        self.0.rsplit_once('-').map(|(project, _)| project)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Jira project key newtype wrapper
///
/// # Examples
///
/// ```
/// use initiative_export::domain::ids::ProjectKey;
///
/// let project = ProjectKey::new("ISDOP").unwrap();
/// assert_eq!(project.as_str(), "ISDOP");
/// assert!(ProjectKey::new("IS DOP").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a new ProjectKey; only ASCII alphanumerics and `_` are accepted
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.is_empty() {
            return Err("Project key cannot be empty".to_string());
        }
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!(
                "Invalid project key '{key}': only letters, digits and '_' are allowed"
            ));
        }
        Ok(Self(key))
    }

    /// Returns the project key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
