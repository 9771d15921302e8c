//! Opening a short link's redirect endpoint in the user's browser.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::domain::entities::ShortCodeRef;
use crate::domain::ports::{NavigationError, Navigator};
use crate::utils::short_code::InputNormalizer;

/// Why a short link could not be opened. Every variant displays a message
/// fit for the user.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("Please enter a short code or URL")]
    EmptyCode,

    #[error("Invalid short code '{0}'")]
    InvalidTarget(String),

    #[error("Could not open URL. Please try copying and pasting it directly.")]
    Navigation(#[source] NavigationError),
}

/// Builds `{origin}{prefix}{code}` and hands it to a [`Navigator`].
#[derive(Clone)]
pub struct RedirectOpener {
    origin: String,
    prefix: String,
    navigator: Arc<dyn Navigator>,
    normalizer: InputNormalizer,
}

impl RedirectOpener {
    pub fn new(
        origin: impl Into<String>,
        prefix: impl Into<String>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let prefix = prefix.into();

        Self {
            origin: origin.into(),
            normalizer: InputNormalizer::new(prefix.clone()),
            prefix,
            navigator,
        }
    }

    pub fn from_config(config: &Config, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(&config.public_origin, &config.path_prefix, navigator)
    }

    /// Address the browser is sent to for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::InvalidTarget`] if the code cannot stand as a
    /// single path segment or the origin is not an absolute URL.
    pub fn target_for(&self, code: &ShortCodeRef) -> Result<Url, OpenError> {
        let code = code.as_str();
        if code.chars().any(is_forbidden) {
            return Err(OpenError::InvalidTarget(code.to_string()));
        }

        let prefix = self.prefix.trim_matches('/');
        let origin = self.origin.trim_end_matches('/');
        let target = if prefix.is_empty() {
            format!("{origin}/{code}")
        } else {
            format!("{origin}/{prefix}/{code}")
        };

        match Url::parse(&target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            _ => Err(OpenError::InvalidTarget(code.to_string())),
        }
    }

    /// Opens the redirect endpoint of `code` in a new browsing context.
    pub fn open(&self, code: &ShortCodeRef) -> Result<(), OpenError> {
        let target = self.target_for(code).inspect_err(|e| {
            warn!(code = %code, error = %e, "Refusing to open short link");
        })?;

        self.navigator.navigate(&target).map_err(|e| {
            warn!(target = %target, error = %e, "Navigation failed");
            OpenError::Navigation(e)
        })?;

        info!(target = %target, "Opened short link");
        Ok(())
    }

    /// Resolves raw user input to a code, then opens it.
    pub fn open_input(&self, raw: &str) -> Result<(), OpenError> {
        let code = self
            .normalizer
            .resolve(raw)
            .map_err(|_| OpenError::EmptyCode)?;

        self.open(&code)
    }
}

fn is_forbidden(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '\\')
}
