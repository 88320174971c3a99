//! Shared helpers for front-end integration tests.

pub mod canned_backend;
