//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use url::Url;
use validator::{Validate, ValidationError};

/// Body of `POST /shorten`.
///
/// An absent alias is sent as an empty string, which the backend treats as
/// "generate a code".
#[derive(Debug, Serialize, Validate)]
pub struct ShortenRequest {
    #[validate(custom(function = "validate_http_url", message = "Invalid URL format"))]
    pub url: String,

    pub custom_alias: String,
}

impl ShortenRequest {
    pub fn new(url: &str, custom_alias: Option<&str>) -> Self {
        Self {
            url: url.trim().to_string(),
            custom_alias: custom_alias.map(str::trim).unwrap_or_default().to_string(),
        }
    }
}

/// Accepts absolute `http` and `https` URLs only.
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::new("http_url").with_message(Cow::from("Invalid URL format"))),
    }
}

/// Successful response of `POST /shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
}
