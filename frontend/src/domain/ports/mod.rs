//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_api;
mod identity_storage;

#[cfg(test)]
pub use backend_api::MockBackendApi;
pub use backend_api::{BackendApi, BackendError};
#[cfg(test)]
pub use identity_storage::MockIdentityStorage;
pub use identity_storage::{
    IdentityStorage, IdentityStorageError, InMemoryIdentityStorage, StorageKey,
};
