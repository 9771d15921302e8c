//! Extension points run around every request.
//!
//! Both hooks are optional: the defaults attach nothing and only log, so
//! the happy path stays a plain JSON call.

use std::fmt;
use url::Url;

/// Supplies the `Authorization` header value attached before send.
pub trait CredentialProvider: Send + Sync {
    /// Returns the full header value (e.g. `Bearer abc`), or `None` to send
    /// the request unauthenticated.
    fn authorization(&self) -> Option<String>;
}

/// Attaches no credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn authorization(&self) -> Option<String> {
        None
    }
}

/// Static bearer token, typically from `API_TOKEN`.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl CredentialProvider for BearerToken {
    fn authorization(&self) -> Option<String> {
        Some(format!("Bearer {}", self.0))
    }
}

/// Observes responses without changing how they propagate.
pub trait ResponseObserver: Send + Sync {
    /// Called for every `401 Unauthorized` response.
    fn on_unauthorized(&self, url: &Url);
}

/// Logs unauthorized responses at `ERROR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUnauthorized;

impl ResponseObserver for LogUnauthorized {
    fn on_unauthorized(&self, url: &Url) {
        tracing::error!(url = %url, "Unauthorized access");
    }
}
