//! Employee model

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account status of an employee.
///
/// Any status may follow any other; the registry does not enforce a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    /// Invitation sent, not yet signed in
    Invited,
    /// Active learner
    Active,
    /// Access revoked; certificates remain valid
    Deactivated,
}

impl EmployeeStatus {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Active => "active",
            Self::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invited" => Ok(Self::Invited),
            "active" => Ok(Self::Active),
            "deactivated" | "inactive" => Ok(Self::Deactivated),
            _ => Err(format!("Unknown employee status: '{s}'")),
        }
    }
}

/// An employee of the company, managed by the employer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee id (e.g., "emp-1718000000000")
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address; not required to be unique
    pub email: String,
    /// Account status
    pub status: EmployeeStatus,
    /// When the employee was added
    #[serde(with = "timestamp")]
    pub joined_date: DateTime<Utc>,
    /// Course ids the employer has assigned, in assignment order, without duplicates
    #[serde(default)]
    pub assigned_courses: Vec<String>,
}

impl Employee {
    /// Create a freshly invited employee with no assigned courses
    #[must_use]
    pub const fn invited(id: String, name: String, email: String, joined_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            status: EmployeeStatus::Invited,
            joined_date,
            assigned_courses: Vec::new(),
        }
    }

    /// Whether the course is assigned
    #[must_use]
    pub fn is_assigned(&self, course_id: &str) -> bool {
        self.assigned_courses.iter().any(|id| id == course_id)
    }

    /// Assign a course. Returns `false` if it was already assigned.
    pub fn assign(&mut self, course_id: &str) -> bool {
        if self.is_assigned(course_id) {
            return false;
        }
        self.assigned_courses.push(course_id.to_string());
        true
    }

    /// Remove a course assignment. Returns `false` if it was not assigned.
    pub fn unassign(&mut self, course_id: &str) -> bool {
        let before = self.assigned_courses.len();
        self.assigned_courses.retain(|id| id != course_id);
        self.assigned_courses.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn amy() -> Employee {
        Employee::invited(
            "emp-1".to_string(),
            "Amy".to_string(),
            "a@x.com".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_invited_employee_defaults() {
        let employee = amy();
        assert_eq!(employee.status, EmployeeStatus::Invited);
        assert!(employee.assigned_courses.is_empty());
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut employee = amy();
        assert!(employee.assign("digital-1"));
        assert!(!employee.assign("digital-1"));
        assert_eq!(employee.assigned_courses, vec!["digital-1".to_string()]);
    }

    #[test]
    fn test_unassign_missing_is_noop() {
        let mut employee = amy();
        employee.assign("digital-1");
        assert!(!employee.unassign("leadership-1"));
        assert_eq!(employee.assigned_courses.len(), 1);
        assert!(employee.unassign("digital-1"));
        assert!(employee.assigned_courses.is_empty());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Active".parse::<EmployeeStatus>(), Ok(EmployeeStatus::Active));
        assert_eq!(
            "deactivated".parse::<EmployeeStatus>(),
            Ok(EmployeeStatus::Deactivated)
        );
        assert!("fired".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_json_shape_matches_storage() {
        let json = r#"{
            "id": "emp-4",
            "name": "James Brown",
            "email": "james.brown@company.com",
            "status": "invited",
            "joinedDate": "2024-03-01",
            "assignedCourses": []
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Invited);
        assert_eq!(
            employee.joined_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["joinedDate"], "2024-03-01T00:00:00.000Z");
        assert_eq!(value["status"], "invited");
    }
}
