//! Completion ledger and certificate issuance

use super::{BusinessError, BusinessStore};
use crate::core::business::ids::{CERTIFICATE_PREFIX, COMPLETION_PREFIX};
use crate::core::models::{Certificate, CompletionRecord};
use crate::core::quiz::QuizOutcome;
use crate::core::storage::{KeyValueStore, StorageKey};
use chrono::{DateTime, TimeDelta, Utc};

/// A completion shows the "New" badge for this many days
pub const NEW_COMPLETION_DAYS: i64 = 7;

/// Whether a completion at `completed` is new at `now`.
///
/// New means strictly less than seven days old; a completion exactly seven
/// days old is not new. Completions dated in the future count as new.
#[must_use]
pub fn is_new_completion(completed: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(completed) < TimeDelta::days(NEW_COMPLETION_DAYS)
}

impl<S: KeyValueStore> BusinessStore<S> {
    /// Record a quiz attempt. A passing attempt also issues a certificate,
    /// linked through the record's `certificate_id`.
    ///
    /// `passed` is taken as given; use [`Self::record_quiz_result`] to derive
    /// it from the score.
    ///
    /// # Errors
    /// Returns [`BusinessError::InvalidScore`] for a score above 100,
    /// [`BusinessError::EmployeeNotFound`] / [`BusinessError::CourseNotFound`]
    /// for unknown ids, or [`BusinessError::Storage`] if a write fails
    pub fn add_completion(
        &mut self,
        employee_id: &str,
        course_id: &str,
        score: u8,
        passed: bool,
    ) -> Result<CompletionRecord, BusinessError> {
        if score > 100 {
            return Err(BusinessError::InvalidScore(score));
        }
        let employee_name = self
            .employee(employee_id)
            .ok_or_else(|| BusinessError::EmployeeNotFound(employee_id.to_string()))?
            .name
            .clone();
        let course_title = self.course(course_id)?.title.clone();

        let now = self.clock.now();
        let id = self.ids.next(COMPLETION_PREFIX, now);
        let certificate_id = passed.then(|| self.ids.next(CERTIFICATE_PREFIX, now));

        let record = CompletionRecord {
            id,
            employee_id: employee_id.to_string(),
            employee_name,
            course_id: course_id.to_string(),
            course_title,
            score,
            passed,
            completed_date: now,
            certificate_id,
        };

        let certificates = match &record.certificate_id {
            Some(cert_id) => {
                let mut certificates = self.certificates.clone();
                certificates.push(Certificate::for_completion(
                    cert_id.clone(),
                    &record,
                    &self.company.name,
                ));
                self.persist(StorageKey::Certificates, &certificates)?;
                Some(certificates)
            }
            None => None,
        };

        let mut completions = self.completions.clone();
        completions.push(record.clone());
        if let Err(err) = self.persist(StorageKey::Completions, &completions) {
            if certificates.is_some() {
                self.restore_certificates();
            }
            return Err(err);
        }

        self.completions = completions;
        if let Some(certificates) = certificates {
            self.certificates = certificates;
        }

        crate::info!(
            "{} completed {} with {}% ({})",
            record.employee_name,
            record.course_id,
            record.score,
            if record.passed { "passed" } else { "failed" }
        );
        Ok(record)
    }

    /// Record a submitted quiz; `passed` comes from the outcome's score
    ///
    /// # Errors
    /// Same as [`Self::add_completion`]
    pub fn record_quiz_result(
        &mut self,
        employee_id: &str,
        outcome: &QuizOutcome,
    ) -> Result<CompletionRecord, BusinessError> {
        self.add_completion(employee_id, &outcome.course_id, outcome.score, outcome.passed)
    }

    /// Completion records for an employee, oldest first
    #[must_use]
    pub fn get_employee_completions(&self, employee_id: &str) -> Vec<&CompletionRecord> {
        self.completions
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .collect()
    }

    /// Certificates held by an employee
    #[must_use]
    pub fn get_employee_certificates(&self, employee_id: &str) -> Vec<&Certificate> {
        self.certificates
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .collect()
    }

    /// Completion records for a course, oldest first
    #[must_use]
    pub fn get_course_completions(&self, course_id: &str) -> Vec<&CompletionRecord> {
        self.completions
            .iter()
            .filter(|c| c.course_id == course_id)
            .collect()
    }

    /// Certificate by id
    #[must_use]
    pub fn certificate(&self, certificate_id: &str) -> Option<&Certificate> {
        self.certificates.iter().find(|c| c.id == certificate_id)
    }

    /// Whether a completion date is new according to the store's clock
    #[must_use]
    pub fn is_new_completion(&self, completed: DateTime<Utc>) -> bool {
        is_new_completion(completed, self.clock.now())
    }

    /// Completions that currently show the "New" badge
    #[must_use]
    pub fn new_completions(&self) -> Vec<&CompletionRecord> {
        let now = self.clock.now();
        self.completions
            .iter()
            .filter(|c| is_new_completion(c.completed_date, now))
            .collect()
    }

    /// Put the in-memory certificate list back into storage after a partial write
    fn restore_certificates(&mut self) {
        let certificates = std::mem::take(&mut self.certificates);
        if let Err(err) = self.persist(StorageKey::Certificates, &certificates) {
            crate::error!("Could not restore certificates after failed completion write: {}", err);
        }
        self.certificates = certificates;
    }
}
