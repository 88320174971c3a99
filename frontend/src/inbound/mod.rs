//! Inbound adapters that translate user input into shell operations.
//!
//! The only transport is a line-oriented event stream: [`events`] parses
//! lines and [`driver`] dispatches them to the shell and the login flow.

pub mod driver;
pub mod events;

pub use driver::NavigationDriver;
pub use events::{EventParseError, NavigationEvent};
