//! Integration tests for logger behavior.

use relevate::logger::{init_file_logging, set_level, set_level_from_str, Level};
use relevate::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("trace"));
    assert!(!set_level_from_str(""));
    assert_eq!(Level::parse("verbose"), None);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_messages() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logs").join("relevate.log");
    assert!(init_file_logging(&path));

    set_level(Level::Info);
    error!("certificate ledger check failed");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("certificate ledger check failed"));
}
