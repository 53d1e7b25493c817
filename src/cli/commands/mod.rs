//! CLI command handlers for `Relevate`.
//!
//! Each command is implemented in its own submodule. Handlers return
//! `Err` with a ready-to-print `✗ ...` message; `main` prints it and exits.

pub mod certificates;
pub mod completions;
pub mod config;
pub mod courses;
pub mod employees;
pub mod quiz;
pub mod referral;
pub mod report;
pub mod session;

use relevate::business::{BusinessStore, Clock, SystemClock};
use relevate::catalog::Catalog;
use relevate::config::Config;
use relevate::models::Employee;
use relevate::seed::BusinessSeed;
use relevate::session::Session;
use relevate::storage::FileStore;
use relevate::{debug, error, verbose};

/// Result type shared by command handlers
pub type CommandResult = Result<(), String>;

/// Open the business store in the configured data directory
pub fn open_business(config: &Config) -> Result<BusinessStore<FileStore>, String> {
    let data_dir = config.data_dir();
    debug!("Opening data directory {}", data_dir.display());
    verbose!("Data directory: {}", data_dir.display());

    let clock = SystemClock;
    let seed = if config.storage.seed_demo {
        BusinessSeed::demo(clock.now())
    } else {
        BusinessSeed::empty()
    };

    BusinessStore::load(FileStore::new(&data_dir), Catalog::builtin(), Box::new(clock), seed)
        .map_err(|e| {
            error!("Failed to load data from {}: {e}", data_dir.display());
            format!("✗ Failed to load data from {}: {e}", data_dir.display())
        })
}

/// Restore the session from the configured data directory
pub fn open_session(config: &Config) -> Session<FileStore> {
    Session::restore(FileStore::new(config.data_dir()))
}

/// Resolve an explicit employee id, or the signed-in user's employee record
pub fn resolve_employee<'a>(
    business: &'a BusinessStore<FileStore>,
    session: &Session<FileStore>,
    employee_id: Option<&str>,
) -> Result<&'a Employee, String> {
    match employee_id {
        Some(id) => business
            .employee(id)
            .ok_or_else(|| format!("✗ Employee not found: '{id}'")),
        None => match session.user() {
            None => Err("✗ Not signed in; pass an employee id or run `relevate login`".to_string()),
            Some(user) => session.current_employee(business).ok_or_else(|| {
                format!("✗ No employee matches the signed-in email '{}'", user.email)
            }),
        },
    }
}

/// `✗` message for any displayable error
pub fn fail(err: impl std::fmt::Display) -> String {
    format!("✗ {err}")
}
