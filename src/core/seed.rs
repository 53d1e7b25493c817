//! Initial business state used when storage holds nothing yet

use crate::core::models::{
    Certificate, CompanyInfo, CompletionRecord, Employee, EmployeeStatus, Plan,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Company name used by the demo data
pub const DEMO_COMPANY: &str = "Demo Company Ltd";

/// Collections a store starts from for any key missing in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessSeed {
    /// Company
    pub company: CompanyInfo,
    /// Employees
    pub employees: Vec<Employee>,
    /// Completion ledger
    pub completions: Vec<CompletionRecord>,
    /// Certificates
    pub certificates: Vec<Certificate>,
    /// Favorite course ids
    pub favorites: Vec<String>,
}

impl BusinessSeed {
    /// No employees or history; a placeholder company on the starter plan
    #[must_use]
    pub fn empty() -> Self {
        Self {
            company: CompanyInfo::new("My Company".to_string(), Plan::Starter, 0),
            employees: Vec::new(),
            completions: Vec::new(),
            certificates: Vec::new(),
            favorites: Vec::new(),
        }
    }

    /// Five employees and five completions, dated relative to `now`
    #[must_use]
    pub fn demo(now: DateTime<Utc>) -> Self {
        let employee = |id: &str, name: &str, status, joined: (i32, u32, u32), courses: &[&str]| {
            let (y, m, d) = joined;
            Employee {
                id: id.to_string(),
                name: name.to_string(),
                email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
                status,
                joined_date: Utc
                    .with_ymd_and_hms(y, m, d, 0, 0, 0)
                    .single()
                    .unwrap_or(now),
                assigned_courses: courses.iter().map(ToString::to_string).collect(),
            }
        };

        let employees = vec![
            employee("emp-1", "Sarah Johnson", EmployeeStatus::Active, (2024, 1, 15), &["hospitality-1", "customer-1"]),
            employee("emp-2", "Michael Chen", EmployeeStatus::Active, (2024, 2, 1), &["leadership-1", "digital-1"]),
            employee("emp-3", "Emma Williams", EmployeeStatus::Active, (2024, 2, 10), &["health-safety-1", "data-protection-1"]),
            employee("emp-4", "James Brown", EmployeeStatus::Invited, (2024, 3, 1), &[]),
            employee("emp-5", "Lisa Anderson", EmployeeStatus::Deactivated, (2023, 11, 20), &["hospitality-1"]),
        ];

        // (completion id, employee, course id, course title, score, days ago, certificate id)
        let history: [(&str, usize, &str, &str, u8, i64, Option<&str>); 5] = [
            ("comp-1", 0, "hospitality-1", "Excellence in Customer Service", 95, 2, Some("cert-1")),
            ("comp-2", 1, "leadership-1", "Effective Team Leadership", 88, 5, Some("cert-2")),
            ("comp-3", 2, "health-safety-1", "Workplace Health & Safety Essentials", 92, 1, Some("cert-3")),
            ("comp-4", 0, "customer-1", "Building Strong Customer Relationships", 75, 10, None),
            ("comp-5", 1, "digital-1", "Digital Skills for the Modern Workplace", 100, 3, Some("cert-4")),
        ];

        let completions: Vec<CompletionRecord> = history
            .iter()
            .map(|&(id, who, course_id, title, score, days_ago, cert)| CompletionRecord {
                id: id.to_string(),
                employee_id: employees[who].id.clone(),
                employee_name: employees[who].name.clone(),
                course_id: course_id.to_string(),
                course_title: title.to_string(),
                score,
                passed: cert.is_some(),
                completed_date: now - TimeDelta::days(days_ago),
                certificate_id: cert.map(ToString::to_string),
            })
            .collect();

        let certificates = completions
            .iter()
            .filter_map(|record| {
                record
                    .certificate_id
                    .clone()
                    .map(|id| Certificate::for_completion(id, record, DEMO_COMPANY))
            })
            .collect();

        Self {
            company: CompanyInfo::new(DEMO_COMPANY.to_string(), Plan::Growth, 5),
            employees,
            completions,
            certificates,
            favorites: Vec::new(),
        }
    }
}
