//! Short-code extraction from free-form user input.
//!
//! Users paste either a bare code (`abc123`) or a full short link
//! (`https://s.example.com/api/abc123`). Both resolve to the same
//! [`ShortCodeRef`].

use url::Url;

use crate::domain::entities::ShortCodeRef;
use crate::error::AppError;

/// Path prefix the reverse proxy mounts the API under.
pub const DEFAULT_PATH_PREFIX: &str = "/api/";

/// Turns raw user text into a canonical short code.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    path_prefix: String,
}

impl InputNormalizer {
    /// Creates a normalizer stripping `path_prefix` (e.g. `/api/`) from URL paths.
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
        }
    }

    /// Extracts a short code from raw input.
    ///
    /// # Extraction Rules
    ///
    /// 1. **Absolute URL**: strip the configured path prefix if present, then
    ///    take the last path segment
    /// 2. **Empty segment** (trailing slash): fall back to the trimmed input
    /// 3. **Anything else**: the trimmed input
    ///
    /// Blank input yields an empty string; use [`Self::resolve`] to reject it.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortlink_client::utils::short_code::InputNormalizer;
    ///
    /// let normalizer = InputNormalizer::default();
    /// assert_eq!(normalizer.normalize("https://host/api/abc123"), "abc123");
    /// assert_eq!(normalizer.normalize("  plain-code  "), "plain-code");
    /// assert_eq!(normalizer.normalize(""), "");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let Ok(url) = Url::parse(trimmed) else {
            return trimmed.to_string();
        };

        let path = url.path();
        let path = match path.strip_prefix(self.path_prefix.as_str()) {
            Some(rest) => rest,
            None => path,
        };

        match path.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => decode_segment(segment),
            _ => trimmed.to_string(),
        }
    }

    /// Normalizes `raw` and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the input is blank, so no
    /// network call is ever issued for it.
    pub fn resolve(&self, raw: &str) -> Result<ShortCodeRef, AppError> {
        ShortCodeRef::new(self.normalize(raw))
    }
}

/// `Url::path()` is percent-encoded; the client encodes segments again on
/// send, so codes taken from URLs must be decoded to match typed ones.
fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_PREFIX)
    }
}
