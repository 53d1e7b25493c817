//! Form validation shared by signup, login and referral
//!
//! Validators never fail fast; they return every failing field so the caller
//! can show each message next to its input.

use crate::core::models::{CompanyInfo, Plan};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest accepted email address
pub const MAX_EMAIL_LEN: usize = 254;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Form input a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Company name
    CompanyName,
    /// Employer's own name
    EmployerName,
    /// Referrer's full name
    FullName,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
    /// Terms & Conditions checkbox
    Terms,
    /// College name and address
    CollegeAddress,
    /// Consent checkbox
    Consent,
}

impl Field {
    /// Form field name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::EmployerName => "employer_name",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::Terms => "terms",
            Self::CollegeAddress => "college_address",
            Self::Consent => "consent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Field the message belongs to
    pub field: Field,
    /// Message shown to the user
    pub message: &'static str,
}

impl FieldError {
    /// Create a field error
    #[must_use]
    pub const fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Whether `email` looks like an address: trimmed, at most
/// [`MAX_EMAIL_LEN`] characters, `local@domain.tld` with no whitespace.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    let trimmed = email.trim();
    if trimmed.is_empty() || email.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    EMAIL_RE.is_match(trimmed)
}

/// Check login credentials
///
/// # Errors
/// Returns every failing field
pub fn validate_login(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if email.trim().is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !validate_email(email) {
        errors.push(FieldError::new(Field::Email, "Please enter a valid email address"));
    }
    if password.trim().is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Employer account signup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerSignup {
    /// Company name
    pub company_name: String,
    /// Employer's name
    pub employer_name: String,
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
    /// Password typed again
    pub confirm_password: String,
    /// Terms & Conditions accepted
    pub agreed_to_terms: bool,
    /// Chosen plan
    pub plan: Plan,
}

impl EmployerSignup {
    /// Every failing field, in form order; empty when the form is valid
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.company_name.trim().is_empty() {
            errors.push(FieldError::new(Field::CompanyName, "Company name is required"));
        }
        if self.employer_name.trim().is_empty() {
            errors.push(FieldError::new(Field::EmployerName, "Your name is required"));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new(Field::Email, "Email is required"));
        } else if !validate_email(&self.email) {
            errors.push(FieldError::new(Field::Email, "Please enter a valid email address"));
        }

        // length is checked untrimmed, emptiness trimmed
        if self.password.trim().is_empty() {
            errors.push(FieldError::new(Field::Password, "Password is required"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                Field::Password,
                "Password must be at least 8 characters",
            ));
        }

        if self.confirm_password.trim().is_empty() {
            errors.push(FieldError::new(
                Field::ConfirmPassword,
                "Please confirm your password",
            ));
        } else if self.password != self.confirm_password {
            errors.push(FieldError::new(Field::ConfirmPassword, "Passwords do not match"));
        }

        if !self.agreed_to_terms {
            errors.push(FieldError::new(
                Field::Terms,
                "You must agree to the Terms & Conditions",
            ));
        }

        errors
    }

    /// Whether the form passes validation
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Company record for a new signup, with no employees yet
    #[must_use]
    pub fn company(&self) -> CompanyInfo {
        CompanyInfo::new(self.company_name.trim().to_string(), self.plan, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> EmployerSignup {
        EmployerSignup {
            company_name: "Acme".to_string(),
            employer_name: "Jo".to_string(),
            email: "jo@acme.io".to_string(),
            password: "hunter222".to_string(),
            confirm_password: "hunter222".to_string(),
            agreed_to_terms: true,
            plan: Plan::Growth,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com"));
        assert!(validate_email("  a@x.com  "));
        assert!(!validate_email(""));
        assert!(!validate_email("   "));
        assert!(!validate_email("a@x"));
        assert!(!validate_email("a b@x.com"));
        assert!(!validate_email("a@@x.com"));
        let long = format!("{}@x.com", "a".repeat(250));
        assert!(!validate_email(&long));
    }

    #[test]
    fn test_valid_signup() {
        let form = signup();
        assert!(form.is_valid());
        assert_eq!(form.company().plan, Plan::Growth);
        assert_eq!(form.company().employee_count, 0);
    }

    #[test]
    fn test_empty_signup_reports_every_field() {
        let form = EmployerSignup {
            company_name: " ".to_string(),
            employer_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            agreed_to_terms: false,
            plan: Plan::Starter,
        };
        let messages: Vec<_> = form.validate().iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            [
                "Company name is required",
                "Your name is required",
                "Email is required",
                "Password is required",
                "Please confirm your password",
                "You must agree to the Terms & Conditions",
            ]
        );
    }

    #[test]
    fn test_password_rules() {
        let mut form = signup();
        form.password = "short".to_string();
        form.confirm_password = "shorter".to_string();
        let errors = form.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, Field::Password);
        assert_eq!(errors[0].to_string(), "Password must be at least 8 characters");
        assert_eq!(errors[1].message, "Passwords do not match");
    }

    #[test]
    fn test_bad_email_message() {
        let mut form = signup();
        form.email = "not-an-email".to_string();
        assert_eq!(
            form.validate(),
            [FieldError::new(Field::Email, "Please enter a valid email address")]
        );
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login("a@x.com", "pw").is_ok());
        let errors = validate_login("nope", " ").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, Field::Email);
        assert_eq!(errors[1].field, Field::Password);
    }
}
