//! Result of probing a short code without following the redirect.

/// Status and target observed for a known short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectProbe {
    pub status_code: u16,
    pub location: String,
}
