//! Key-value persistence
//!
//! Each collection is stored whole under one key as a JSON snapshot, the way the
//! app keeps its state in device storage. [`FileStore`] keeps one file per key;
//! [`MemoryStore`] keeps everything in a map.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] or the JSON helpers
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot be stored
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        /// Key being accessed
        key: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not valid JSON for the expected type
    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        /// Key being read
        key: String,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be serialized
    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        /// Key being written
        key: String,
        /// Serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Store refuses writes
    #[error("Storage is read-only; cannot write '{0}'")]
    ReadOnly(String),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Read the raw value for `key`, `None` if absent
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the medium cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the value cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key succeeds
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the medium cannot be written
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Keys used by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// [`CompanyInfo`](crate::core::models::CompanyInfo)
    Company,
    /// Employee list
    Employees,
    /// Completion ledger
    Completions,
    /// Issued certificates
    Certificates,
    /// Favorite course ids
    FavoriteCourses,
    /// Signed-in user
    User,
}

impl StorageKey {
    /// Every key, in load order
    pub const ALL: [Self; 6] = [
        Self::Company,
        Self::Employees,
        Self::Completions,
        Self::Certificates,
        Self::FavoriteCourses,
        Self::User,
    ];

    /// Key string as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Employees => "employees",
            Self::Completions => "completions",
            Self::Certificates => "certificates",
            Self::FavoriteCourses => "favoriteCourses",
            Self::User => "user",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a key is safe to use as a file stem
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Read and deserialize a JSON value. Absent and blank values read as `None`.
///
/// # Errors
/// Returns [`StorageError::Corrupt`] if the stored text is not valid for `T`
pub fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: StorageKey,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Serialize and store a JSON value
///
/// # Errors
/// Returns an error if serialization or the write fails
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key.as_str(), &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("favoriteCourses").is_ok());
        assert!(validate_key("user_2-b").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_read_json_blank_is_absent() {
        let mut store = MemoryStore::new();
        store.set("favoriteCourses", "   ").unwrap();
        let favorites: Option<Vec<String>> = read_json(&store, StorageKey::FavoriteCourses).unwrap();
        assert!(favorites.is_none());
    }

    #[test]
    fn test_read_json_corrupt_is_reported() {
        let mut store = MemoryStore::new();
        store.set("employees", "{not json").unwrap();
        let result: Result<Option<Vec<String>>, _> = read_json(&store, StorageKey::Employees);
        assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == "employees"));
    }

    #[test]
    fn test_write_then_read_json() {
        let mut store = MemoryStore::new();
        let ids = vec!["digital-1".to_string(), "leadership-1".to_string()];
        write_json(&mut store, StorageKey::FavoriteCourses, &ids).unwrap();
        let loaded: Option<Vec<String>> = read_json(&store, StorageKey::FavoriteCourses).unwrap();
        assert_eq!(loaded, Some(ids));
    }
}
