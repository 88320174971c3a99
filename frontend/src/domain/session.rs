//! Session store: the authenticated identity plus the shell title slot.
//!
//! The store is an explicit object handed to the shell and every page; there
//! is no ambient session. Mutators update memory and then write through to
//! [`IdentityStorage`] before returning.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use super::ports::{IdentityStorage, IdentityStorageError, StorageKey};
use super::{Error, Identity, RoleCode};

/// Title shown before any page sets its own.
pub const DEFAULT_TITLE: &str = "Título Padrão";

/// Identity holder with durable write-through persistence.
pub struct SessionStore {
    storage: Arc<dyn IdentityStorage>,
    identity: RwLock<Identity>,
    title: RwLock<String>,
}

impl SessionStore {
    /// Build a store from whatever `storage` holds.
    ///
    /// Missing, unreadable or inconsistent entries yield the logged-out
    /// identity; this never fails.
    pub fn rehydrate(storage: Arc<dyn IdentityStorage>) -> Self {
        let identity = load_identity(storage.as_ref());
        debug!(
            logged_in = !identity.is_logged_out(),
            role = identity.role().code(),
            "session rehydrated"
        );
        Self {
            storage,
            identity: RwLock::new(identity),
            title: RwLock::new(DEFAULT_TITLE.to_owned()),
        }
    }

    /// Snapshot of the composed identity.
    pub fn identity(&self) -> Identity {
        self.read_identity().clone()
    }

    /// Current subject id; empty when logged out.
    pub fn subject_id(&self) -> String {
        self.read_identity().subject_id().to_owned()
    }

    /// Current display name.
    pub fn display_name(&self) -> String {
        self.read_identity().display_name().to_owned()
    }

    /// Current role.
    pub fn role(&self) -> RoleCode {
        self.read_identity().role()
    }

    /// Overwrite the whole identity. No validation is performed.
    ///
    /// # Errors
    ///
    /// Returns an internal error when durable storage rejects the write. The
    /// in-memory identity is updated regardless.
    pub fn set_identity(
        &self,
        subject_id: &str,
        display_name: &str,
        role: RoleCode,
    ) -> Result<(), Error> {
        *self.write_identity() = Identity::new(subject_id, display_name, role);
        debug!(role = role.code(), "session identity set");
        self.persist(StorageKey::SubjectId, subject_id)?;
        self.persist(StorageKey::DisplayName, display_name)?;
        self.persist(StorageKey::RoleCode, role.code())
    }

    /// Change the role only.
    ///
    /// # Errors
    ///
    /// Returns an internal error when durable storage rejects the write.
    pub fn set_role(&self, role: RoleCode) -> Result<(), Error> {
        self.write_identity().set_role(role);
        debug!(role = role.code(), "session role changed");
        self.persist(StorageKey::RoleCode, role.code())
    }

    /// Reset to the logged-out identity and remove every persisted entry.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure after attempting every removal.
    pub fn clear(&self) -> Result<(), Error> {
        *self.write_identity() = Identity::logged_out();
        debug!("session cleared");
        let mut first_error = None;
        for key in StorageKey::ALL {
            if let Err(error) = self.storage.remove(key) {
                warn!(key = key.name(), %error, "failed to remove identity entry");
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), |error| Err(storage_error(&error)))
    }

    /// Title shown in the shell header. Not persisted.
    pub fn title(&self) -> String {
        self.title
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the header title.
    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.write().unwrap_or_else(PoisonError::into_inner) = title.into();
    }

    fn persist(&self, key: StorageKey, value: &str) -> Result<(), Error> {
        self.storage.write(key, value).map_err(|error| {
            warn!(key = key.name(), %error, "failed to persist identity entry");
            storage_error(&error)
        })
    }

    fn read_identity(&self) -> RwLockReadGuard<'_, Identity> {
        self.identity.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_identity(&self) -> RwLockWriteGuard<'_, Identity> {
        self.identity.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn storage_error(error: &IdentityStorageError) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

fn load_identity(storage: &dyn IdentityStorage) -> Identity {
    match read_entries(storage) {
        Ok(identity) => identity,
        Err(error) => {
            warn!(%error, "identity storage unreadable; starting logged out");
            Identity::logged_out()
        }
    }
}

fn read_entries(storage: &dyn IdentityStorage) -> Result<Identity, IdentityStorageError> {
    let subject_id = storage.read(StorageKey::SubjectId)?.unwrap_or_default();
    let display_name = storage.read(StorageKey::DisplayName)?.unwrap_or_default();
    let raw_role = storage.read(StorageKey::RoleCode)?.unwrap_or_default();
    let role = RoleCode::parse(&raw_role).ok_or_else(|| {
        IdentityStorageError::corrupt(StorageKey::RoleCode.name(), format!("unknown role {raw_role:?}"))
    })?;

    if subject_id.is_empty() != role.is_unset() {
        return Err(IdentityStorageError::corrupt(
            StorageKey::SubjectId.name(),
            "subject id and role disagree on login state",
        ));
    }
    Ok(Identity::new(subject_id, display_name, role))
}
