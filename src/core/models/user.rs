//! Signed-in user model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role chosen at login; selects which dashboard is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Student
    Student,
    /// Teacher
    Teacher,
    /// Employee taking assigned training
    Employee,
    /// Employer managing a team
    Employer,
    /// Business (legacy dashboard)
    Business,
}

impl UserRole {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Employee => "employee",
            Self::Employer => "employer",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "employee" => Ok(Self::Employee),
            "employer" => Ok(Self::Employer),
            "business" => Ok(Self::Business),
            _ => Err(format!("Unknown role: '{s}'")),
        }
    }
}

/// Identity supplied by the session; treated as opaque by the business store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: String,
    /// Login email, used to find the matching employee
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Role
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Employer".parse::<UserRole>(), Ok(UserRole::Employer));
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_without_name_deserializes() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","email":"a@x.com","role":"student"}"#).unwrap();
        assert!(user.name.is_empty());
        assert_eq!(user.role, UserRole::Student);
    }
}
