//! Domain layer containing the client's view-models and seams.
//!
//! # Architecture
//!
//! - [`entities`] - Result types handed to the user interface
//! - [`ports`] - Traits for side effects (health checks, navigation)
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the HTTP transport
//! - Port traits are implemented by the infrastructure and application layers
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod ports;
