//! College referral form, posted once to a hosted form endpoint

use crate::core::validation::{validate_email, Field, FieldError};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Form endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/mwprvdao";

/// Subject line attached to every submission
pub const SUBJECT: &str = "Relevate referral";

/// Origin tag attached to every submission
pub const ORIGIN: &str = "relevate-cli";

/// Errors raised while submitting a referral
#[derive(Debug, Error)]
pub enum ReferralError {
    /// The form did not pass validation
    #[error("{0}")]
    Invalid(FieldError),

    /// The request could not be sent
    #[error("Could not send. Check your connection and try again. ({0})")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Referral endpoint rejected the submission with status {0}")]
    Rejected(u16),
}

/// Someone recommending Relevate to their college
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Referral {
    /// Referrer's full name
    pub full_name: String,
    /// Referrer's email
    pub email: String,
    /// College name and address
    pub college_address: String,
    /// Permission to contact the college
    pub consent: bool,
}

/// JSON body sent to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralPayload<'a> {
    /// Referrer's full name
    pub full_name: &'a str,
    /// Referrer's email
    pub email: &'a str,
    /// College name and address
    pub college_address: &'a str,
    /// Subject line
    #[serde(rename = "_subject")]
    pub subject: &'static str,
    /// Origin tag
    #[serde(rename = "_origin")]
    pub origin: &'static str,
}

impl Referral {
    /// First failing field, checked in form order
    ///
    /// # Errors
    /// Returns the message for the first missing or malformed field
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.full_name.trim().is_empty() {
            return Err(FieldError::new(Field::FullName, "Please enter your full name"));
        }
        if self.email.trim().is_empty() {
            return Err(FieldError::new(Field::Email, "Please enter your email address"));
        }
        if !validate_email(&self.email) {
            return Err(FieldError::new(Field::Email, "Please enter a valid email address"));
        }
        if self.college_address.trim().is_empty() {
            return Err(FieldError::new(
                Field::CollegeAddress,
                "Please enter your college name and address",
            ));
        }
        if !self.consent {
            return Err(FieldError::new(
                Field::Consent,
                "Please agree to let Relevate contact your college",
            ));
        }
        Ok(())
    }

    /// Request body for this referral
    #[must_use]
    pub fn payload(&self) -> ReferralPayload<'_> {
        ReferralPayload {
            full_name: &self.full_name,
            email: &self.email,
            college_address: &self.college_address,
            subject: SUBJECT,
            origin: ORIGIN,
        }
    }
}

/// Blocking HTTP client for the referral endpoint
#[derive(Debug)]
pub struct ReferralClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ReferralClient {
    /// Client posting to `endpoint`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(endpoint: &str) -> Result<Self, ReferralError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// Endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate and post the referral once; there is no retry
    ///
    /// # Errors
    /// Returns [`ReferralError::Invalid`] before sending anything if the form
    /// is incomplete, [`ReferralError::Transport`] if the request fails, or
    /// [`ReferralError::Rejected`] for a non-success status
    pub fn submit(&self, referral: &Referral) -> Result<(), ReferralError> {
        referral.validate().map_err(ReferralError::Invalid)?;

        crate::debug!("Posting referral to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&referral.payload())
            .send()
            .map_err(|err| {
                crate::error!("Referral submission error: {}", err);
                ReferralError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            crate::error!("Referral submission error: status {}", status);
            return Err(ReferralError::Rejected(status.as_u16()));
        }
        crate::info!("Referral sent for {}", referral.email.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referral() -> Referral {
        Referral {
            full_name: "Sam Lee".to_string(),
            email: "sam@uni.ac.uk".to_string(),
            college_address: "Riverside College, 1 High St".to_string(),
            consent: true,
        }
    }

    #[test]
    fn test_valid_referral() {
        assert!(referral().validate().is_ok());
    }

    #[test]
    fn test_validation_order() {
        let empty = Referral::default();
        assert_eq!(empty.validate().unwrap_err().message, "Please enter your full name");

        let mut form = referral();
        form.email = "sam".to_string();
        assert_eq!(form.validate().unwrap_err().message, "Please enter a valid email address");

        let mut form = referral();
        form.college_address = "  ".to_string();
        assert_eq!(form.validate().unwrap_err().field, Field::CollegeAddress);

        let mut form = referral();
        form.consent = false;
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please agree to let Relevate contact your college"
        );
    }

    #[test]
    fn test_payload_shape() {
        let form = referral();
        let value = serde_json::to_value(form.payload()).unwrap();
        assert_eq!(value["full_name"], "Sam Lee");
        assert_eq!(value["email"], "sam@uni.ac.uk");
        assert_eq!(value["college_address"], "Riverside College, 1 High St");
        assert_eq!(value["_subject"], "Relevate referral");
        assert_eq!(value["_origin"], ORIGIN);
        assert!(value.get("consent").is_none());
    }

    #[test]
    fn test_invalid_referral_is_not_sent() {
        let client = ReferralClient::new("http://127.0.0.1:9/unused").unwrap();
        let err = client.submit(&Referral::default()).unwrap_err();
        assert!(matches!(err, ReferralError::Invalid(_)));
    }
}
