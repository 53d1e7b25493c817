//! Business training state: employees, completions, certificates and favorites
//!
//! [`BusinessStore`] owns the in-memory collections together with the
//! [`KeyValueStore`] they are persisted to. Every mutation writes the complete
//! affected collection first and only replaces the in-memory copy once the
//! write succeeded, so a failed write leaves the store exactly as it was.

pub mod clock;
mod completions;
mod employees;
mod favorites;
pub mod ids;
mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use completions::{is_new_completion, NEW_COMPLETION_DAYS};
pub use ids::IdGenerator;
pub use views::{EmployeeProgress, LedgerIssue, TeamSummary};

use crate::core::catalog::Catalog;
use crate::core::models::{Certificate, CompanyInfo, CompletionRecord, Course, Employee};
use crate::core::seed::BusinessSeed;
use crate::core::storage::{read_json, write_json, KeyValueStore, StorageError, StorageKey};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by [`BusinessStore`] operations
#[derive(Debug, Error)]
pub enum BusinessError {
    /// No employee has this id
    #[error("Employee not found: '{0}'")]
    EmployeeNotFound(String),

    /// No course in the catalog has this id
    #[error("Course not found: '{0}'")]
    CourseNotFound(String),

    /// Score outside 0-100
    #[error("Invalid score {0}; expected 0-100")]
    InvalidScore(u8),

    /// Persisting the change failed; in-memory state is unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Typed application state for the employer/employee dashboards
pub struct BusinessStore<S: KeyValueStore> {
    store: S,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    company: CompanyInfo,
    employees: Vec<Employee>,
    completions: Vec<CompletionRecord>,
    certificates: Vec<Certificate>,
    favorites: Vec<String>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> BusinessStore<S> {
    /// Load every collection from `store`. Keys with no stored value start
    /// from the matching part of `seed`; nothing is written until the first
    /// mutation.
    ///
    /// # Errors
    /// Returns an error if a key cannot be read or holds malformed JSON
    pub fn load(
        store: S,
        catalog: Catalog,
        clock: Box<dyn Clock>,
        seed: BusinessSeed,
    ) -> Result<Self, StorageError> {
        let company = load_or(&store, StorageKey::Company, seed.company)?;
        let employees = load_or(&store, StorageKey::Employees, seed.employees)?;
        let completions = load_or(&store, StorageKey::Completions, seed.completions)?;
        let certificates = load_or(&store, StorageKey::Certificates, seed.certificates)?;
        let favorites = load_or(&store, StorageKey::FavoriteCourses, seed.favorites)?;

        let mut ids = IdGenerator::new();
        for id in employees
            .iter()
            .map(|e: &Employee| e.id.as_str())
            .chain(completions.iter().map(|c: &CompletionRecord| c.id.as_str()))
            .chain(certificates.iter().map(|c: &Certificate| c.id.as_str()))
        {
            ids.observe(id);
        }

        crate::info!(
            "Loaded {} employees, {} completions, {} certificates",
            employees.len(),
            completions.len(),
            certificates.len()
        );

        Ok(Self {
            store,
            catalog,
            clock,
            company,
            employees,
            completions,
            certificates,
            favorites,
            ids,
        })
    }

    /// Course catalog the store validates ids against
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Backing key-value store
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store, e.g. for the session
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Current time from the store's clock
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Company info
    #[must_use]
    pub const fn company(&self) -> &CompanyInfo {
        &self.company
    }

    /// Replace the company info
    ///
    /// # Errors
    /// Returns [`BusinessError::Storage`] if the write fails
    pub fn save_company(&mut self, company: CompanyInfo) -> Result<(), BusinessError> {
        self.persist(StorageKey::Company, &company)?;
        self.company = company;
        Ok(())
    }

    /// Every completion record, oldest first
    #[must_use]
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completions
    }

    /// Every issued certificate
    #[must_use]
    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Look up a catalog course or fail with [`BusinessError::CourseNotFound`]
    fn course(&self, course_id: &str) -> Result<&Course, BusinessError> {
        self.catalog
            .get(course_id)
            .ok_or_else(|| BusinessError::CourseNotFound(course_id.to_string()))
    }

    fn persist<T: Serialize + ?Sized>(
        &mut self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), BusinessError> {
        write_json(&mut self.store, key, value).map_err(|err| {
            crate::error!("Failed to persist '{}': {}", key, err);
            BusinessError::Storage(err)
        })
    }
}

fn load_or<T, S>(store: &S, key: StorageKey, fallback: T) -> Result<T, StorageError>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore,
{
    match read_json(store, key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => {
            crate::debug!("No stored '{}', using initial data", key);
            Ok(fallback)
        }
        Err(err) => {
            crate::error!("{}", err);
            Err(err)
        }
    }
}
