//! Front-end core for the medication dispensing service.
//!
//! The crate models the client side of the service: a shell that decides
//! what to show for a path and the session's role, the pages it mounts, the
//! login flow, and the transient notification surface. Rendering is left to
//! whoever drives [`inbound::NavigationDriver`]; the bundled binary drives
//! it from a line-oriented event stream.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
