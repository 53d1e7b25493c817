//! Certificate model

use super::timestamp;
use super::CompletionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential issued for a passing completion.
///
/// Certificates are never removed; they outlive the employee's status and the
/// company's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Certificate id (e.g., "cert-1718000000000")
    pub id: String,
    /// Holder
    pub employee_id: String,
    /// Holder name at issue time
    pub employee_name: String,
    /// Course completed
    pub course_id: String,
    /// Course title at issue time
    pub course_title: String,
    /// Completion time
    #[serde(with = "timestamp")]
    pub completed_date: DateTime<Utc>,
    /// Passing score
    pub score: u8,
    /// Issuing company
    pub company_name: String,
}

impl Certificate {
    /// Build the certificate for a completion record
    #[must_use]
    pub fn for_completion(id: String, record: &CompletionRecord, company_name: &str) -> Self {
        Self {
            id,
            employee_id: record.employee_id.clone(),
            employee_name: record.employee_name.clone(),
            course_id: record.course_id.clone(),
            course_title: record.course_title.clone(),
            completed_date: record.completed_date,
            score: record.score,
            company_name: company_name.to_string(),
        }
    }

    /// Whether this certificate belongs to the given completion record
    #[must_use]
    pub fn matches(&self, record: &CompletionRecord) -> bool {
        record.certificate_id.as_deref() == Some(self.id.as_str())
            && record.employee_id == self.employee_id
            && record.course_id == self.course_id
    }
}
