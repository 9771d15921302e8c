//! Infrastructure layer for external integrations.
//!
//! This layer talks to the outside world: the remote service over HTTP and
//! the local browser.
//!
//! # Modules
//!
//! - [`http`] - Configured `reqwest` transport and response normalization
//! - [`browser`] - [`crate::domain::ports::Navigator`] backed by the OS URL opener

pub mod browser;
pub mod http;
