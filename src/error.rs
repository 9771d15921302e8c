//! Normalized error type shared by every fallible operation.
//!
//! All transport and backend failures are folded into [`AppError`] at the
//! [`crate::infrastructure::http`] boundary, so callers only ever match on
//! one shape. [`AppError::envelope`] flattens any variant into the wire-level
//! [`ErrorEnvelope`] the user interface displays.

use serde::Serialize;
use thiserror::Error;

/// The single failure shape surfaced to the user interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Discriminant of [`AppError`], useful for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Rejected,
    Network,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Missing or malformed user input, caught before any network call.
    #[error("{message}")]
    Validation { message: String },

    /// The backend answered 404 (or a non-redirect status to a probe).
    #[error("{message}")]
    NotFound { message: String, status_code: u16 },

    /// The backend answered 409, e.g. a requested alias is taken.
    #[error("{message}")]
    Conflict { message: String, status_code: u16 },

    /// The backend refused the request with a structured `{error}` body.
    #[error("{message}")]
    Rejected { message: String, status_code: u16 },

    /// No structured response was received (timeout, refused, reset).
    #[error("{message}")]
    Network { message: String },

    /// A response arrived but could not be read into the expected shape.
    #[error("{message}")]
    Unexpected {
        message: String,
        status_code: Option<u16>,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, status_code: u16) -> Self {
        Self::NotFound {
            message: message.into(),
            status_code,
        }
    }

    pub fn conflict(message: impl Into<String>, status_code: u16) -> Self {
        Self::Conflict {
            message: message.into(),
            status_code,
        }
    }

    pub fn rejected(message: impl Into<String>, status_code: u16) -> Self {
        Self::Rejected {
            message: message.into(),
            status_code,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Unexpected {
            message: message.into(),
            status_code,
        }
    }

    /// Maps a transport-level `reqwest::Error` that carries no usable body.
    ///
    /// The detail is logged; the caller-facing message is always `fallback`
    /// so the interface shows a stable, generic text. A body that arrived but
    /// could not be read or decoded becomes [`AppError::Unexpected`]; every
    /// other failure, timeouts included, is [`AppError::Network`].
    pub fn from_transport(error: &reqwest::Error, fallback: &str) -> Self {
        let status = error.status().map(|s| s.as_u16());

        if !error.is_timeout() && (error.is_decode() || error.is_body()) {
            tracing::warn!(error = %error, "Response body could not be read");
            return Self::unexpected(fallback, status);
        }

        let cause = if error.is_timeout() {
            "timeout"
        } else if error.is_connect() {
            "connect"
        } else if error.is_request() {
            "request"
        } else if error.is_redirect() {
            "redirect"
        } else if error.is_builder() {
            "builder"
        } else {
            "other"
        };
        tracing::warn!(cause, error = %error, "Transport failure");

        Self::network(fallback)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { status_code, .. }
            | Self::Conflict { status_code, .. }
            | Self::Rejected { status_code, .. } => Some(*status_code),
            Self::Unexpected { status_code, .. } => *status_code,
            Self::Validation { .. } | Self::Network { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Rejected { message, .. }
            | Self::Network { message }
            | Self::Unexpected { message, .. } => message,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.message().to_string(),
            status_code: self.status_code(),
        }
    }
}
