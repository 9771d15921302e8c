//! Boundary normalization of HTTP responses into typed results.
//!
//! Every operation except the redirect probe funnels its response through
//! [`normalize_response`], so the mapping from status and body to
//! [`AppError`] lives in exactly one place.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::api::dto::error::ErrorBody;
use crate::error::AppError;

/// Reads `response` into `T` or the matching [`AppError`].
///
/// # Mapping
///
/// | Response | Result |
/// |---|---|
/// | 2xx, body decodes as `T` | `Ok(T)` |
/// | 2xx, body does not decode | [`AppError::Unexpected`] |
/// | 404 | [`AppError::NotFound`] |
/// | 409 | [`AppError::Conflict`] |
/// | other, `{"error": ...}` body | [`AppError::Rejected`] |
/// | other, unreadable body | [`AppError::Unexpected`] |
///
/// Backend messages are forwarded verbatim; `fallback` is used whenever
/// the body carries none.
pub async fn normalize_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::from_transport(&e, fallback))?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Response did not match the expected shape");
            AppError::unexpected(fallback, Some(status.as_u16()))
        });
    }

    Err(error_from_status(status, &body, fallback))
}

/// Maps a non-success status and its raw body to an [`AppError`].
pub fn error_from_status(status: StatusCode, body: &str, fallback: &str) -> AppError {
    let code = status.as_u16();
    let message = ErrorBody::message_from(body);

    let error = match status {
        StatusCode::NOT_FOUND => AppError::not_found(message.as_deref().unwrap_or(fallback), code),
        StatusCode::CONFLICT => AppError::conflict(message.as_deref().unwrap_or(fallback), code),
        _ => match message {
            Some(message) => AppError::rejected(message, code),
            None => AppError::unexpected(fallback, Some(code)),
        },
    };

    warn!(status = code, error = %error, "Request failed");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_not_found_uses_backend_message() {
        let err = error_from_status(StatusCode::NOT_FOUND, r#"{"error":"URL not found"}"#, "x");
        assert_eq!(err, AppError::not_found("URL not found", 404));
    }

    #[test]
    fn test_not_found_without_body_uses_fallback() {
        let err = error_from_status(StatusCode::NOT_FOUND, "", "Failed to get statistics");
        assert_eq!(err, AppError::not_found("Failed to get statistics", 404));
    }

    #[test]
    fn test_conflict() {
        let err = error_from_status(
            StatusCode::CONFLICT,
            r#"{"error":"alias already taken"}"#,
            "Failed to shorten URL",
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "alias already taken");
    }

    #[test]
    fn test_structured_bad_request_is_forwarded() {
        let err = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"custom alias already exists"}"#,
            "Failed to shorten URL",
        );
        assert_eq!(err, AppError::rejected("custom alias already exists", 400));
    }

    #[test]
    fn test_unstructured_server_error_is_unexpected() {
        let err = error_from_status(
            StatusCode::BAD_GATEWAY,
            "<html>Bad Gateway</html>",
            "Failed to shorten URL",
        );
        assert_eq!(err, AppError::unexpected("Failed to shorten URL", Some(502)));
    }
}
