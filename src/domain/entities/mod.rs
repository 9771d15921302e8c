//! Core view-models exchanged between the operations and the interface.
//!
//! # Entity Types
//!
//! - [`ShortCodeRef`] - Canonical short code, never empty
//! - [`ShortenResult`] - A freshly created short link
//! - [`StatsResult`] - Usage snapshot of a short link
//! - [`RedirectProbe`] - Redirect status and target of a short link
//! - [`HealthStatus`] - Liveness of the remote service
//!
//! None of these are persisted; each call builds new values.

pub mod health;
pub mod link;
pub mod redirect;
pub mod short_code;

pub use health::{HealthState, HealthStatus};
pub use link::{ShortenResult, StatsResult};
pub use redirect::RedirectProbe;
pub use short_code::ShortCodeRef;
