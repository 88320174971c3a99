//! Driven port for durable identity storage.
//!
//! The session store writes through to this port synchronously on every
//! mutation and reads from it once at start-up. Entries are plain strings
//! keyed by fixed names, like browser local storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::define_port_error;

/// Fixed keys of the persisted identity entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Subject id (CPF).
    SubjectId,
    /// Display name.
    DisplayName,
    /// Role code.
    RoleCode,
}

impl StorageKey {
    /// Every key, in persistence order.
    pub const ALL: [Self; 3] = [Self::SubjectId, Self::DisplayName, Self::RoleCode];

    /// Entry name in durable storage.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SubjectId => "codUsuarioCPF",
            Self::DisplayName => "nomUsuario",
            Self::RoleCode => "idtPapel",
        }
    }
}

define_port_error! {
    /// Errors raised by identity storage adapters.
    pub enum IdentityStorageError {
        /// Storage could not be opened, read or written.
        Unavailable { message: String } =>
            "identity storage unavailable: {message}",
        /// An entry exists but cannot be decoded.
        Corrupt { key: String, message: String } =>
            "identity storage entry {key} is corrupt: {message}",
    }
}

/// Port for reading and writing persisted identity entries.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityStorage: Send + Sync {
    /// Read an entry; `Ok(None)` when it is absent.
    fn read(&self, key: StorageKey) -> Result<Option<String>, IdentityStorageError>;

    /// Create or overwrite an entry.
    fn write(&self, key: StorageKey, value: &str) -> Result<(), IdentityStorageError>;

    /// Remove an entry; removing an absent entry succeeds.
    fn remove(&self, key: StorageKey) -> Result<(), IdentityStorageError>;
}

/// Process-local storage used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl InMemoryIdentityStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityStorage for InMemoryIdentityStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, IdentityStorageError> {
        Ok(self.entries().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), IdentityStorageError> {
        self.entries().insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), IdentityStorageError> {
        self.entries().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn in_memory_storage_round_trips_entries() {
        let storage = InMemoryIdentityStorage::new();
        storage
            .write(StorageKey::DisplayName, "Maria")
            .expect("write succeeds");
        assert_eq!(
            storage.read(StorageKey::DisplayName).expect("read"),
            Some("Maria".to_owned())
        );

        storage.remove(StorageKey::DisplayName).expect("remove");
        storage.remove(StorageKey::DisplayName).expect("second remove");
        assert_eq!(storage.read(StorageKey::DisplayName).expect("read"), None);
    }

    #[rstest]
    fn key_names_match_persisted_entries() {
        let names: Vec<_> = StorageKey::ALL.iter().map(|key| key.name()).collect();
        assert_eq!(names, ["codUsuarioCPF", "nomUsuario", "idtPapel"]);
    }
}
