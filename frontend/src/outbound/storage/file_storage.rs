//! Directory-backed identity storage.
//!
//! Each entry lives in its own file named after the storage key, inside a
//! directory opened once through `cap_std`. Writes go to a staging file that
//! is renamed into place, so a crash never leaves a half-written entry.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{IdentityStorage, IdentityStorageError, StorageKey};

/// Identity storage persisting one file per key.
pub struct FileIdentityStorage {
    root: PathBuf,
    dir: Dir,
}

impl FileIdentityStorage {
    /// Open (creating if needed) the storage directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStorageError::Unavailable`] when the directory
    /// cannot be created or opened.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IdentityStorageError> {
        let root = root.into();
        Dir::create_ambient_dir_all(&root, ambient_authority())
            .map_err(|error| unavailable(&root, &error))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .map_err(|error| unavailable(&root, &error))?;
        debug!(root = %root.display(), "identity storage opened");
        Ok(Self { root, dir })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

fn unavailable(path: &Path, error: &io::Error) -> IdentityStorageError {
    IdentityStorageError::unavailable(format!("{}: {error}", path.display()))
}

fn staging_name(key: StorageKey) -> String {
    format!(".{}.tmp", key.name())
}

impl IdentityStorage for FileIdentityStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, IdentityStorageError> {
        match self.dir.read_to_string(key.name()) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) if error.kind() == io::ErrorKind::InvalidData => Err(
                IdentityStorageError::corrupt(key.name(), error.to_string()),
            ),
            Err(error) => Err(unavailable(&self.root.join(key.name()), &error)),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), IdentityStorageError> {
        let staging = staging_name(key);
        self.dir
            .write(&staging, value.as_bytes())
            .map_err(|error| unavailable(&self.root.join(&staging), &error))?;
        self.dir
            .rename(&staging, &self.dir, key.name())
            .map_err(|error| unavailable(&self.root.join(key.name()), &error))
    }

    fn remove(&self, key: StorageKey) -> Result<(), IdentityStorageError> {
        match self.dir.remove_file(key.name()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(unavailable(&self.root.join(key.name()), &error)),
        }
    }
}
