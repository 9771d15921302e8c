//! HTTP transport to the remote short-code service.
//!
//! - [`client`] - Shared, configured `reqwest` client
//! - [`response`] - Status/body normalization into [`crate::error::AppError`]
//! - [`interceptors`] - Credential and unauthorized-response hooks

pub mod client;
pub mod interceptors;
pub mod response;

pub use client::RequestClient;
pub use interceptors::{BearerToken, CredentialProvider, LogUnauthorized, NoCredentials, ResponseObserver};
pub use response::{error_from_status, normalize_response};
