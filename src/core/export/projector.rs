//! Row projection
//!
//! Maps one parent and its children onto fixed-width CSV rows. A parent with
//! no children still produces exactly one row, filled with placeholders.

use crate::domain::{ChildIssue, OutputRow, ParentIssue};
use chrono::NaiveDateTime;

/// Child key column for a parent without children
pub const NO_CHILD_KEY: &str = "No child issues";

/// Child summary column for a parent without children
pub const NO_CHILD_SUMMARY: &str = "No child issues found";

/// Status, type, URL and date columns for a parent without children
pub const PLACEHOLDER: &str = "-";

/// Date column when the tracker returned no creation timestamp
pub const NO_DATE: &str = "No date";

const SOURCE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SOURCE_DATE_LEN: usize = 19;

/// Project a parent and its children into output rows
///
/// # Example
///
/// ```
/// use initiative_export::core::export::projector::{project_rows, NO_CHILD_KEY};
/// use initiative_export::domain::{IssueKey, ParentIssue};
///
/// let parent = ParentIssue::new(IssueKey::new("ISDOP-1").unwrap(), "Portal");
/// let rows = project_rows(&parent, &[]);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].child_key, NO_CHILD_KEY);
/// ```
pub fn project_rows(parent: &ParentIssue, children: &[ChildIssue]) -> Vec<OutputRow> {
    if children.is_empty() {
        return vec![placeholder_row(parent)];
    }

    children
        .iter()
        .map(|child| OutputRow {
            parent_key: parent.key.to_string(),
            parent_summary: parent.summary.clone(),
            child_key: child.key.to_string(),
            child_summary: child.summary.clone(),
            child_status: child.status.clone(),
            child_type: child.issue_type.clone(),
            child_url: child.url.clone(),
            created: format_date(child.created.as_deref().unwrap_or_default()),
        })
        .collect()
}

fn placeholder_row(parent: &ParentIssue) -> OutputRow {
    OutputRow {
        parent_key: parent.key.to_string(),
        parent_summary: parent.summary.clone(),
        child_key: NO_CHILD_KEY.to_string(),
        child_summary: NO_CHILD_SUMMARY.to_string(),
        child_status: PLACEHOLDER.to_string(),
        child_type: PLACEHOLDER.to_string(),
        child_url: PLACEHOLDER.to_string(),
        created: PLACEHOLDER.to_string(),
    }
}

/// Render a tracker timestamp as `YYYY-MM-DD HH:MM:SS`
///
/// Only the first 19 characters are parsed, which drops fractional seconds
/// and the UTC offset. Anything unparseable is returned unchanged.
///
/// # Example
///
/// ```
/// use initiative_export::core::export::projector::format_date;
///
/// assert_eq!(format_date("2025-06-10T14:30:00.000+0000"), "2025-06-10 14:30:00");
/// assert_eq!(format_date("not-a-date"), "not-a-date");
/// ```
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return NO_DATE.to_string();
    }

    let head = match raw.char_indices().nth(SOURCE_DATE_LEN) {
        Some((end, _)) => &raw[..end],
        None => raw,
    };

    match NaiveDateTime::parse_from_str(head, SOURCE_DATE_FORMAT) {
        Ok(dt) => dt.format(OUTPUT_DATE_FORMAT).to_string(),
        Err(e) => {
            tracing::trace!(raw = %raw, error = %e, "Keeping unparseable date as-is");
            raw.to_string()
        }
    }
}
