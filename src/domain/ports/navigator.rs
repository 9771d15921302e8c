//! Seam between the redirect opener and the platform's browser.

use thiserror::Error;
use url::Url;

/// Failure to hand an address to the browser.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no browser opener available on this platform")]
    Unsupported,

    #[error("failed to launch browser: {0}")]
    Launch(#[from] std::io::Error),

    #[error("navigation blocked: {0}")]
    Blocked(String),
}

/// Opens an address in a new browsing context.
///
/// # Implementations
///
/// - [`crate::infrastructure::browser::SystemNavigator`] - Platform opener command
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &Url) -> Result<(), NavigationError>;
}
