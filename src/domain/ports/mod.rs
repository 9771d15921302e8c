//! Trait definitions for the collaborators the application layer drives.
//!
//! These traits are the seams where side effects leave the crate. Concrete
//! implementations live in [`crate::infrastructure`] and
//! [`crate::application::services`]; mocks are generated via `mockall`.
//!
//! - [`HealthProbe`] - One liveness check of the remote service
//! - [`Navigator`] - Opening an address in a browser

pub mod health_probe;
pub mod navigator;

pub use health_probe::HealthProbe;
pub use navigator::{NavigationError, Navigator};

#[cfg(test)]
pub use health_probe::MockHealthProbe;
#[cfg(test)]
pub use navigator::MockNavigator;
