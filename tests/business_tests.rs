//! Integration tests for the business store over on-disk storage

use chrono::{TimeDelta, TimeZone, Utc};
use relevate::business::{BusinessStore, Clock, FixedClock, LedgerIssue};
use relevate::catalog::Catalog;
use relevate::models::{Employee, EmployeeStatus};
use relevate::quiz::{QuizSession, PASS_THRESHOLD};
use relevate::seed::BusinessSeed;
use relevate::storage::{FileStore, KeyValueStore, StorageKey};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

fn open(dir: &TempDir, clock: &FixedClock, seed: BusinessSeed) -> BusinessStore<FileStore> {
    BusinessStore::load(
        FileStore::new(dir.path()),
        Catalog::builtin(),
        Box::new(clock.clone()),
        seed,
    )
    .expect("store should load")
}

fn open_empty(dir: &TempDir, clock: &FixedClock) -> BusinessStore<FileStore> {
    open(dir, clock, BusinessSeed::empty())
}

#[test]
fn add_employee_starts_invited_with_no_courses() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir, &clock());

    let amy = store.add_employee("Amy", "a@x.com").unwrap();
    assert_eq!(amy.status, EmployeeStatus::Invited);
    assert!(amy.assigned_courses.is_empty());
    assert_eq!(store.employees(), std::slice::from_ref(&amy));
}

#[test]
fn employees_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    let expected: Vec<Employee> = {
        let mut store = open_empty(&dir, &clock);
        store.add_employee("Amy", "amy@x.com").unwrap();
        clock.advance(TimeDelta::seconds(1));
        let ben = store.add_employee("Ben", "ben@x.com").unwrap();
        store.assign_course(&ben.id, "leadership-1").unwrap();
        store.assign_course(&ben.id, "digital-1").unwrap();
        store
            .update_employee_status(&ben.id, EmployeeStatus::Active)
            .unwrap();
        store.employees().to_vec()
    };

    let reloaded = open_empty(&dir, &clock);
    assert_eq!(reloaded.employees(), expected.as_slice());
}

#[test]
fn passing_completion_issues_matching_certificate() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir, &clock());
    let emp = store.add_employee("Amy", "amy@x.com").unwrap();

    let record = store
        .add_completion(&emp.id, "hospitality-1", 85, true)
        .unwrap();
    let cert_id = record.certificate_id.clone().expect("certificate id");

    assert_eq!(store.completions().len(), 1);
    assert_eq!(store.certificates().len(), 1);
    let cert = &store.certificates()[0];
    assert_eq!(cert.id, cert_id);
    assert_eq!(cert.employee_id, emp.id);
    assert_eq!(cert.employee_name, "Amy");
    assert_eq!(cert.course_id, "hospitality-1");
    assert_eq!(cert.course_title, record.course_title);
    assert_eq!(cert.score, 85);
    assert_eq!(cert.completed_date, record.completed_date);
    assert_eq!(cert.company_name, "My Company");
}

#[test]
fn failing_completion_issues_no_certificate() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir, &clock());
    let emp = store.add_employee("Amy", "amy@x.com").unwrap();

    let record = store
        .add_completion(&emp.id, "hospitality-1", 60, false)
        .unwrap();
    assert!(record.certificate_id.is_none());
    assert_eq!(store.completions().len(), 1);
    assert!(store.certificates().is_empty());
}

#[test]
fn certificates_biject_with_passing_completions_after_reload() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    {
        let mut store = open(&dir, &clock, BusinessSeed::demo(clock.now()));
        for (score, passed) in [(90, true), (40, false), (80, true), (79, false)] {
            clock.advance(TimeDelta::minutes(1));
            store
                .add_completion("emp-3", "data-protection-1", score, passed)
                .unwrap();
        }
    }

    let store = open_empty(&dir, &clock);
    let passing: Vec<_> = store.completions().iter().filter(|c| c.passed).collect();
    assert_eq!(passing.len(), store.certificates().len());
    for record in &passing {
        let matching = store
            .certificates()
            .iter()
            .filter(|c| c.employee_id == record.employee_id && c.course_id == record.course_id)
            .filter(|c| Some(&c.id) == record.certificate_id.as_ref())
            .count();
        assert_eq!(matching, 1, "{}", record.id);
    }
    assert!(store.ledger_issues().is_empty());
}

#[test]
fn quiz_result_passes_at_threshold() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir, &clock());
    let emp = store.add_employee("Amy", "amy@x.com").unwrap();

    // digital-1 answers: 2, 1, 1, 0, 1; miss the last one
    let course = store.catalog().get("digital-1").unwrap().clone();
    let mut quiz = QuizSession::new(&course).unwrap();
    quiz.answer_all(&[2, 1, 1, 0, 0]).unwrap();
    let outcome = quiz.submit().unwrap();
    assert_eq!(outcome.score, 80);
    assert!(outcome.score >= PASS_THRESHOLD);
    assert!(outcome.passed);

    let record = store.record_quiz_result(&emp.id, &outcome).unwrap();
    assert!(record.passed);
    assert!(record.certificate_id.is_some());
}

#[test]
fn favorites_toggle_twice_restores_disk_state() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    let mut store = open_empty(&dir, &clock);
    store.toggle_favorite("leadership-1").unwrap();
    let before = store.favorites().to_vec();

    assert!(store.toggle_favorite("digital-1").unwrap());
    assert!(!store.toggle_favorite("digital-1").unwrap());
    assert_eq!(store.favorites(), before.as_slice());

    let reloaded = open_empty(&dir, &clock);
    assert_eq!(reloaded.favorites(), before.as_slice());
}

#[test]
fn assign_is_idempotent_and_unassign_absent_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir, &clock());
    let emp = store.add_employee("Amy", "amy@x.com").unwrap();

    assert!(store.assign_course(&emp.id, "leadership-1").unwrap());
    assert!(!store.assign_course(&emp.id, "leadership-1").unwrap());
    assert_eq!(
        store.employee(&emp.id).unwrap().assigned_courses,
        vec!["leadership-1".to_string()]
    );

    let before = store.employees().to_vec();
    assert!(!store.unassign_course(&emp.id, "digital-1").unwrap());
    assert_eq!(store.employees(), before.as_slice());
}

#[test]
fn new_badge_boundary() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    let store = open_empty(&dir, &clock);
    let now = store.now();

    assert!(store.is_new_completion(now - TimeDelta::days(6)));
    assert!(store.is_new_completion(now - TimeDelta::days(7) + TimeDelta::milliseconds(1)));
    assert!(!store.is_new_completion(now - TimeDelta::days(7)));
    assert!(!store.is_new_completion(now - TimeDelta::days(8)));
}

#[test]
fn demo_seed_is_not_written_until_first_change() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    let mut store = open(&dir, &clock, BusinessSeed::demo(clock.now()));
    assert_eq!(store.employees().len(), 5);
    assert!(store.storage().get(StorageKey::Employees.as_str()).unwrap().is_none());

    store
        .update_employee_status("emp-4", EmployeeStatus::Active)
        .unwrap();
    assert!(store.storage().get(StorageKey::Employees.as_str()).unwrap().is_some());

    let reloaded = open_empty(&dir, &clock);
    assert_eq!(reloaded.employees().len(), 5);
    assert_eq!(reloaded.employee("emp-4").unwrap().status, EmployeeStatus::Active);
}

#[test]
fn ids_continue_after_reload() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    let first = open_empty(&dir, &clock).add_employee("Amy", "amy@x.com").unwrap();

    // same millisecond, new process
    let second = open_empty(&dir, &clock).add_employee("Ben", "ben@x.com").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn corrupt_collection_fails_load() {
    let dir = TempDir::new().unwrap();
    let mut files = FileStore::new(dir.path());
    files.set(StorageKey::Completions.as_str(), "[{not json").unwrap();

    let result = BusinessStore::load(
        files,
        Catalog::builtin(),
        Box::new(clock()),
        BusinessSeed::empty(),
    );
    assert!(result.is_err());
}

#[test]
fn hand_edited_orphan_certificate_is_reported() {
    let dir = TempDir::new().unwrap();
    let clock = clock();
    {
        let mut store = open_empty(&dir, &clock);
        let emp = store.add_employee("Amy", "amy@x.com").unwrap();
        store.add_completion(&emp.id, "digital-1", 90, true).unwrap();
    }

    // drop the completion behind the store's back
    let mut files = FileStore::new(dir.path());
    files.set(StorageKey::Completions.as_str(), "[]").unwrap();

    let store = open_empty(&dir, &clock);
    let issues = store.ledger_issues();
    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], LedgerIssue::OrphanCertificate(_)));
}
