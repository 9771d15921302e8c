//! # Shortlink Client
//!
//! Client-side orchestration for a short-code redirect service: create short
//! links, read their statistics, probe redirects without following them,
//! watch the service's health and open links in the browser.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - View-models and the collaborator traits
//! - **Application Layer** ([`application`]) - Operations, health monitor and opener
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` transport and OS browser
//! - **API Layer** ([`api`]) - Wire DTOs of the remote service
//!
//! Every fallible remote call returns [`AppError`], whose
//! [`envelope`](AppError::envelope) is the single failure shape shown to
//! users. The health check never fails; it reports an unhealthy status
//! instead.
//!
//! ## Quick Start
//!
//! ```bash
//! export APP_ENV="development"        # backend on http://localhost:8080
//! cargo run -- shorten https://example.com --alias docs
//! cargo run -- stats docs
//! cargo run -- watch
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        HealthMonitor, MonitorSnapshot, MonitorState, OpenError, RedirectOpener, UrlService,
    };
    pub use crate::domain::entities::{
        HealthState, HealthStatus, RedirectProbe, ShortCodeRef, ShortenResult, StatsResult,
    };
    pub use crate::error::{AppError, ErrorEnvelope, ErrorKind};
    pub use crate::infrastructure::http::RequestClient;
    pub use crate::state::AppState;
    pub use crate::utils::short_code::InputNormalizer;
}
