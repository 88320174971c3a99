//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **backend**: reqwest client for the dispensing REST backend
//! - **storage**: `cap_std` directory holding the persisted identity entries
//!
//! Adapters are thin translators between domain types and their wire or
//! file representations. They contain no business logic.

pub mod backend;
pub mod storage;
