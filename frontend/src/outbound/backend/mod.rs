//! Dispensing backend outbound adapter.
//!
//! A thin HTTP implementation of the `BackendApi` port.

mod dto;
mod http_client;

pub use http_client::HttpBackendClient;
