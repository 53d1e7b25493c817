//! Signed-in user, kept under the `user` storage key
//!
//! Login is a mock: any well-formed email and non-empty password sign in. The
//! business store only sees the resulting [`User`] and resolves it to an
//! employee by email.

use crate::core::business::BusinessStore;
use crate::core::models::{Employee, User, UserRole};
use crate::core::storage::{write_json, KeyValueStore, StorageError, StorageKey};
use crate::core::validation::{validate_login, FieldError};
use thiserror::Error;

/// Id given to every mock login
pub const MOCK_USER_ID: &str = "1";

/// Errors raised while signing in or out
#[derive(Debug, Error)]
pub enum SessionError {
    /// Credentials failed validation
    #[error("Could not sign in: {}", join_messages(.0))]
    InvalidCredentials(Vec<FieldError>),

    /// Persisting the session failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The current session over a key-value store
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    user: Option<User>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the stored user. A value that is blank, not JSON, or missing an
    /// id, email or known role is removed from storage and the session starts
    /// signed out.
    pub fn restore(mut store: S) -> Self {
        let raw = match store.get(StorageKey::User.as_str()) {
            Ok(raw) => raw,
            Err(err) => {
                crate::warn!("Error loading user: {}", err);
                clear_user(&mut store);
                return Self { store, user: None };
            }
        };

        let Some(raw) = raw else {
            return Self { store, user: None };
        };

        let user = match serde_json::from_str::<User>(&raw) {
            Ok(user) if !user.id.trim().is_empty() && !user.email.trim().is_empty() => Some(user),
            Ok(_) => {
                crate::warn!("Invalid user data format, clearing storage");
                None
            }
            Err(err) => {
                crate::warn!("Error parsing user data, clearing storage: {}", err);
                None
            }
        };
        if user.is_none() {
            clear_user(&mut store);
        }

        Self { store, user }
    }

    /// Signed-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in. The user gets id [`MOCK_USER_ID`] and the local part of the
    /// email as display name.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCredentials`] for a malformed email or
    /// empty password, or [`SessionError::Storage`] if the write fails
    pub fn login(&mut self, email: &str, password: &str, role: UserRole) -> Result<&User, SessionError> {
        validate_login(email, password).map_err(SessionError::InvalidCredentials)?;

        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email);
        let user = User {
            id: MOCK_USER_ID.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
        };

        write_json(&mut self.store, StorageKey::User, &user)?;
        crate::info!("Signed in as {} ({})", user.email, user.role);
        Ok(self.user.insert(user))
    }

    /// Sign out and forget the stored user
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the stored user cannot be removed
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(StorageKey::User.as_str())?;
        self.user = None;
        Ok(())
    }

    /// Employee record for the signed-in user, matched by email
    #[must_use]
    pub fn current_employee<'b, T: KeyValueStore>(
        &self,
        business: &'b BusinessStore<T>,
    ) -> Option<&'b Employee> {
        self.user
            .as_ref()
            .and_then(|user| business.employee_by_email(&user.email))
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }
}

fn clear_user(store: &mut impl KeyValueStore) {
    if let Err(err) = store.remove(StorageKey::User.as_str()) {
        crate::error!("Error clearing storage: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::business::SystemClock;
    use crate::core::catalog::Catalog;
    use crate::core::seed::BusinessSeed;
    use crate::core::storage::MemoryStore;
    use crate::core::validation::Field;
    use chrono::Utc;

    fn restored(raw: &str) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set("user", raw).unwrap();
        Session::restore(store)
    }

    #[test]
    fn test_restore_nothing_stored() {
        let session = Session::restore(MemoryStore::new());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_restore_valid_user() {
        let session =
            restored(r#"{"id":"1","email":"sarah.johnson@company.com","name":"sarah.johnson","role":"employee"}"#);
        let user = session.user().unwrap();
        assert_eq!(user.role, UserRole::Employee);
        assert_eq!(user.name, "sarah.johnson");
    }

    #[test]
    fn test_restore_clears_malformed_values() {
        for raw in [
            "   ",
            "{broken",
            r#"{"id":"","email":"a@x.com","role":"student"}"#,
            r#"{"id":"1","email":"a@x.com","role":"wizard"}"#,
            r#"{"id":"1","role":"student"}"#,
            "[]",
        ] {
            let session = restored(raw);
            assert!(session.user().is_none(), "{raw}");
            assert!(session.into_store().get("user").unwrap().is_none(), "{raw}");
        }
    }

    #[test]
    fn test_login_creates_mock_user() {
        let mut session = Session::restore(MemoryStore::new());
        let user = session
            .login(" jo.smith@acme.io ", "secret", UserRole::Employer)
            .unwrap()
            .clone();
        assert_eq!(user.id, MOCK_USER_ID);
        assert_eq!(user.name, "jo.smith");
        assert_eq!(user.email, "jo.smith@acme.io");

        let again = Session::restore(session.into_store());
        assert_eq!(again.user(), Some(&user));
    }

    #[test]
    fn test_login_rejects_bad_email() {
        let mut session = Session::restore(MemoryStore::new());
        let err = session.login("jo", "secret", UserRole::Student).unwrap_err();
        match err {
            SessionError::InvalidCredentials(errors) => assert_eq!(errors[0].field, Field::Email),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_logout_clears_storage() {
        let mut session = Session::restore(MemoryStore::new());
        session.login("a@x.com", "pw", UserRole::Student).unwrap();
        session.logout().unwrap();
        assert!(session.user().is_none());
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_current_employee_matches_email() {
        let business = BusinessStore::load(
            MemoryStore::new(),
            Catalog::builtin(),
            Box::new(SystemClock),
            BusinessSeed::demo(Utc::now()),
        )
        .unwrap();

        let mut session = Session::restore(MemoryStore::new());
        assert!(session.current_employee(&business).is_none());
        session
            .login("Emma.Williams@company.com", "pw", UserRole::Employee)
            .unwrap();
        assert_eq!(session.current_employee(&business).unwrap().id, "emp-3");
    }
}
