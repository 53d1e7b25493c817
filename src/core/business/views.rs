//! Derived views for the dashboards

use super::{BusinessError, BusinessStore};
use crate::core::models::{Course, EmployeeStatus};
use crate::core::quiz::score_percent;
use crate::core::storage::KeyValueStore;
use std::fmt;

/// How far an employee is through their assigned courses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProgress {
    /// Employee
    pub employee_id: String,
    /// Assigned courses
    pub assigned: usize,
    /// Assigned courses with at least one passing completion
    pub completed: usize,
    /// `completed / assigned` as a rounded percentage; 0 with nothing assigned
    pub percent: u8,
}

/// Company-wide training numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSummary {
    /// All employees
    pub total_employees: usize,
    /// Employees with status `active`
    pub active_employees: usize,
    /// Employees with status `invited`
    pub invited_employees: usize,
    /// Completion records
    pub total_completions: usize,
    /// Certificates issued
    pub certificates_issued: usize,
    /// Mean score over all completions, rounded; 0 with no completions
    pub average_score: u8,
    /// Share of completions that passed, as a rounded percentage
    pub pass_rate: u8,
}

/// A broken link between the completion ledger and the certificates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerIssue {
    /// Passing completion with no matching certificate
    MissingCertificate(String),
    /// Passing completion matched by more than one certificate
    DuplicateCertificate(String),
    /// Failing completion that references a certificate
    CertificateOnFailure(String),
    /// Certificate with no passing completion behind it
    OrphanCertificate(String),
}

impl fmt::Display for LedgerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCertificate(id) => write!(f, "completion {id} passed but has no certificate"),
            Self::DuplicateCertificate(id) => write!(f, "completion {id} has more than one certificate"),
            Self::CertificateOnFailure(id) => write!(f, "completion {id} failed but references a certificate"),
            Self::OrphanCertificate(id) => write!(f, "certificate {id} has no passing completion"),
        }
    }
}

impl<S: KeyValueStore> BusinessStore<S> {
    /// Catalog courses assigned to an employee, in assignment order. Ids not
    /// in the catalog are skipped.
    ///
    /// # Errors
    /// Returns [`BusinessError::EmployeeNotFound`] for an unknown employee
    pub fn assigned_courses(&self, employee_id: &str) -> Result<Vec<&Course>, BusinessError> {
        let employee = self
            .employee(employee_id)
            .ok_or_else(|| BusinessError::EmployeeNotFound(employee_id.to_string()))?;
        Ok(employee
            .assigned_courses
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect())
    }

    /// Progress through assigned courses
    ///
    /// # Errors
    /// Returns [`BusinessError::EmployeeNotFound`] for an unknown employee
    pub fn employee_progress(&self, employee_id: &str) -> Result<EmployeeProgress, BusinessError> {
        let employee = self
            .employee(employee_id)
            .ok_or_else(|| BusinessError::EmployeeNotFound(employee_id.to_string()))?;

        let assigned = employee.assigned_courses.len();
        let completed = employee
            .assigned_courses
            .iter()
            .filter(|course_id| {
                self.completions
                    .iter()
                    .any(|c| c.passed && c.employee_id == employee_id && &c.course_id == *course_id)
            })
            .count();

        Ok(EmployeeProgress {
            employee_id: employee_id.to_string(),
            assigned,
            completed,
            percent: score_percent(completed, assigned),
        })
    }

    /// Numbers for the employer dashboard
    #[must_use]
    pub fn team_summary(&self) -> TeamSummary {
        let count_status =
            |status: EmployeeStatus| self.employees.iter().filter(|e| e.status == status).count();

        let total_completions = self.completions.len();
        let passed = self.completions.iter().filter(|c| c.passed).count();
        let score_sum: usize = self.completions.iter().map(|c| usize::from(c.score)).sum();
        let average_score = if total_completions == 0 {
            0
        } else {
            // rounded mean, half up
            u8::try_from((score_sum * 2 + total_completions) / (total_completions * 2))
                .unwrap_or(100)
        };

        TeamSummary {
            total_employees: self.employees.len(),
            active_employees: count_status(EmployeeStatus::Active),
            invited_employees: count_status(EmployeeStatus::Invited),
            total_completions,
            certificates_issued: self.certificates.len(),
            average_score,
            pass_rate: score_percent(passed, total_completions),
        }
    }

    /// Check that certificates correspond one-to-one with passing completions
    #[must_use]
    pub fn ledger_issues(&self) -> Vec<LedgerIssue> {
        let mut issues = Vec::new();

        for record in &self.completions {
            let matching = self.certificates.iter().filter(|c| c.matches(record)).count();
            if record.passed {
                match matching {
                    0 => issues.push(LedgerIssue::MissingCertificate(record.id.clone())),
                    1 => {}
                    _ => issues.push(LedgerIssue::DuplicateCertificate(record.id.clone())),
                }
            } else if record.certificate_id.is_some() {
                issues.push(LedgerIssue::CertificateOnFailure(record.id.clone()));
            }
        }

        for cert in &self.certificates {
            if !self.completions.iter().any(|c| c.passed && cert.matches(c)) {
                issues.push(LedgerIssue::OrphanCertificate(cert.id.clone()));
            }
        }

        issues
    }
}
