//! Durable identity storage adapters.

mod file_storage;

pub use file_storage::FileIdentityStorage;
