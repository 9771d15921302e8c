//! Canonical short-code reference passed to every remote operation.

use std::fmt;

use crate::error::AppError;

/// A non-empty short code with no leading or trailing whitespace.
///
/// Obtain one through [`crate::utils::short_code::InputNormalizer::resolve`]
/// for free-form user input, or [`ShortCodeRef::new`] for a code that is
/// already known (e.g. from a shorten response).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCodeRef(String);

impl ShortCodeRef {
    /// Trims `code` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if nothing is left after trimming.
    pub fn new(code: impl AsRef<str>) -> Result<Self, AppError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Please enter a short code or URL"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCodeRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_short_code_is_trimmed() {
        let code = ShortCodeRef::new("  abc123 \n").unwrap();
        assert_eq!(code.as_str(), "abc123");
        assert_eq!(code.to_string(), "abc123");
    }

    #[test]
    fn test_blank_short_code_is_rejected() {
        for input in ["", "   ", "\t\n"] {
            let err = ShortCodeRef::new(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }
}
