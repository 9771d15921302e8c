//! DTO for the health endpoint.

use serde::Deserialize;

/// Body of `GET /health`. Extra fields (`service`, `timestamp`) are ignored.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    #[serde(default)]
    pub error: Option<String>,
}
