//! Training report CSV, one row per completion record

use super::{write_file, ExportError};
use crate::core::business::BusinessStore;
use crate::core::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Column headers, in order
pub const REPORT_HEADERS: [&str; 8] = [
    "Employee",
    "Email",
    "Course",
    "Category",
    "Score",
    "Passed",
    "Completed",
    "Certificate ID",
];

/// `training_report_<YYYYMMDD>.csv` for the given day
#[must_use]
pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("training_report_{}.csv", now.format("%Y%m%d"))
}

/// Render the completion ledger as CSV.
///
/// Names and titles come from the record as stored. Email and category are
/// looked up and left blank when the employee or course no longer exists.
///
/// # Errors
/// Returns an error if CSV encoding fails
pub fn training_report_csv<S: KeyValueStore>(store: &BusinessStore<S>) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_HEADERS)?;

    for record in store.completions() {
        let email = store
            .employee(&record.employee_id)
            .map(|e| e.email.as_str())
            .unwrap_or_default();
        let category = store
            .catalog()
            .get(&record.course_id)
            .map(|c| c.category.label())
            .unwrap_or_default();

        let score = record.score.to_string();
        let completed = record.completed_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            record.employee_name.as_str(),
            email,
            record.course_title.as_str(),
            category,
            score.as_str(),
            if record.passed { "Yes" } else { "No" },
            completed.as_str(),
            record.certificate_id.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the training report into `dir`, named after today's date
///
/// # Errors
/// Returns an error if encoding or writing the file fails
pub fn write_training_report<S: KeyValueStore>(
    store: &BusinessStore<S>,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let csv = training_report_csv(store)?;
    write_file(dir, &report_file_name(store.now()), &csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::business::FixedClock;
    use crate::core::catalog::Catalog;
    use crate::core::seed::BusinessSeed;
    use crate::core::storage::MemoryStore;
    use chrono::TimeZone;

    fn demo() -> BusinessStore<MemoryStore> {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        BusinessStore::load(
            MemoryStore::new(),
            Catalog::builtin(),
            Box::new(FixedClock::new(now)),
            BusinessSeed::demo(now),
        )
        .unwrap()
    }

    #[test]
    fn test_report_rows() {
        let csv = training_report_csv(&demo()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Employee,Email,Course,Category,Score,Passed,Completed,Certificate ID"
        );
        assert_eq!(
            lines[1],
            "Sarah Johnson,sarah.johnson@company.com,Excellence in Customer Service,Hospitality,95,Yes,2024-05-30,cert-1"
        );
        assert_eq!(
            lines[4],
            "Sarah Johnson,sarah.johnson@company.com,Building Strong Customer Relationships,Customer Relationships,75,No,2024-05-22,"
        );
    }

    #[test]
    fn test_report_quotes_fields_with_commas() {
        let mut store = BusinessStore::load(
            MemoryStore::new(),
            Catalog::builtin(),
            Box::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())),
            BusinessSeed::empty(),
        )
        .unwrap();
        let id = store.add_employee("Brown, James", "jb@x.com").unwrap().id;
        store.add_completion(&id, "work-life-1", 40, false).unwrap();

        let csv = training_report_csv(&store).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Brown, James\",jb@x.com,Achieving Work-Life Balance,Work-Life Balance,40,No,"));
    }

    #[test]
    fn test_report_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(report_file_name(now), "training_report_20240601.csv");
    }
}
