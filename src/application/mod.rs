//! Application layer orchestrating the remote short-link service.
//!
//! Services here turn user input into remote calls through
//! [`crate::infrastructure::http::RequestClient`] and hand back typed results
//! or a normalized [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Shorten, statistics, redirect probe and health
//! - [`services::health_monitor::HealthMonitor`] - Periodic liveness polling
//! - [`services::redirect_opener::RedirectOpener`] - Opening a short link in the browser

pub mod services;
