//! Completion record model

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one employee submitting one course quiz.
///
/// `employee_name` and `course_title` are copied at completion time and are
/// not refreshed if the source records change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Record id (e.g., "comp-1718000000000")
    pub id: String,
    /// Employee who took the quiz
    pub employee_id: String,
    /// Employee name at completion time
    pub employee_name: String,
    /// Course the quiz belongs to
    pub course_id: String,
    /// Course title at completion time
    pub course_title: String,
    /// Percentage score, 0-100
    pub score: u8,
    /// Whether the attempt passed
    pub passed: bool,
    /// When the quiz was submitted
    #[serde(with = "timestamp")]
    pub completed_date: DateTime<Utc>,
    /// Certificate issued for this attempt, present iff `passed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
}
