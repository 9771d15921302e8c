//! Seam between the health monitor and whatever performs the check.

use async_trait::async_trait;

use crate::domain::entities::HealthStatus;

/// Performs one liveness check of the remote service.
///
/// Implementations must fail soft: every failure is reported as an
/// unhealthy [`HealthStatus`], never as an error or a panic.
///
/// # Implementations
///
/// - [`crate::application::services::UrlService`] - Calls `GET /health`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> HealthStatus;
}
