//! Integration tests for the stored session over a data directory

use relevate::business::{BusinessStore, SystemClock};
use relevate::catalog::Catalog;
use relevate::models::UserRole;
use relevate::seed::BusinessSeed;
use relevate::session::{Session, SessionError, MOCK_USER_ID};
use relevate::storage::{FileStore, KeyValueStore, StorageKey};
use tempfile::TempDir;

fn restore(dir: &TempDir) -> Session<FileStore> {
    Session::restore(FileStore::new(dir.path()))
}

#[test]
fn login_survives_restart() {
    let dir = TempDir::new().unwrap();
    restore(&dir)
        .login("  sarah.johnson@company.com ", "secret", UserRole::Employee)
        .unwrap();

    let session = restore(&dir);
    let user = session.user().expect("still signed in");
    assert_eq!(user.id, MOCK_USER_ID);
    assert_eq!(user.email, "sarah.johnson@company.com");
    assert_eq!(user.name, "sarah.johnson");
    assert_eq!(user.role, UserRole::Employee);
}

#[test]
fn logout_removes_user_file() {
    let dir = TempDir::new().unwrap();
    let mut session = restore(&dir);
    session.login("a@x.com", "pw", UserRole::Employer).unwrap();
    session.logout().unwrap();

    assert!(!restore(&dir).is_signed_in());
    assert!(!dir.path().join("user.json").exists());
}

#[test]
fn malformed_user_is_cleared_on_restore() {
    let dir = TempDir::new().unwrap();
    let mut files = FileStore::new(dir.path());
    files.set(StorageKey::User.as_str(), "{\"id\":").unwrap();

    let session = restore(&dir);
    assert!(!session.is_signed_in());
    assert!(session.into_store().get(StorageKey::User.as_str()).unwrap().is_none());
}

#[test]
fn user_with_unknown_role_is_cleared() {
    let dir = TempDir::new().unwrap();
    let mut files = FileStore::new(dir.path());
    files
        .set(
            StorageKey::User.as_str(),
            r#"{"id":"1","email":"a@x.com","name":"a","role":"admin"}"#,
        )
        .unwrap();

    assert!(!restore(&dir).is_signed_in());
    assert!(!dir.path().join("user.json").exists());
}

#[test]
fn rejected_login_keeps_previous_user() {
    let dir = TempDir::new().unwrap();
    let mut session = restore(&dir);
    session.login("a@x.com", "pw", UserRole::Employee).unwrap();

    let err = session.login("not-an-email", "", UserRole::Employer).unwrap_err();
    match err {
        SessionError::InvalidCredentials(errors) => assert_eq!(errors.len(), 2),
        SessionError::Storage(e) => panic!("unexpected storage error: {e}"),
    }
    assert_eq!(restore(&dir).user().unwrap().email, "a@x.com");
}

#[test]
fn signed_in_employee_resolves_by_email() {
    let dir = TempDir::new().unwrap();
    let business = BusinessStore::load(
        FileStore::new(dir.path()),
        Catalog::builtin(),
        Box::new(SystemClock),
        BusinessSeed::demo(chrono::Utc::now()),
    )
    .unwrap();

    let mut session = restore(&dir);
    session
        .login("Michael.Chen@Company.com", "pw", UserRole::Employee)
        .unwrap();
    assert_eq!(session.current_employee(&business).unwrap().id, "emp-2");

    session.login("nobody@company.com", "pw", UserRole::Employee).unwrap();
    assert!(session.current_employee(&business).is_none());
}
