//! The four remote operations on short links.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Method, Response, StatusCode};
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use crate::api::dto::error::ErrorBody;
use crate::api::dto::health::HealthResponse;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::dto::stats::StatsResponse;
use crate::domain::entities::{HealthStatus, RedirectProbe, ShortCodeRef, ShortenResult, StatsResult};
use crate::domain::ports::HealthProbe;
use crate::error::AppError;
use crate::infrastructure::http::RequestClient;

const SHORTEN_FAILED: &str = "Failed to shorten URL";
const STATS_FAILED: &str = "Failed to get statistics";
const REDIRECT_NOT_FOUND: &str = "URL not found";
const SERVICE_UNAVAILABLE: &str = "Service unavailable";

/// Service issuing shorten, statistics, redirect-probe and health calls.
///
/// Every method except [`Self::health`] returns a typed result or an
/// [`AppError`]; none of them panic on remote failures.
#[derive(Clone)]
pub struct UrlService {
    client: RequestClient,
}

impl UrlService {
    /// Creates a new URL service on top of a configured transport.
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    /// Creates a short link for `url`, optionally under a custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is blank or not an absolute
    /// http(s) URL; no request is sent in that case.
    ///
    /// Alias conflicts come back exactly as the backend phrased them
    /// ([`AppError::Conflict`] on 409, [`AppError::Rejected`] otherwise);
    /// nothing is retried.
    pub async fn shorten(&self, url: &str, alias: Option<&str>) -> Result<ShortenResult, AppError> {
        if url.trim().is_empty() {
            return Err(AppError::validation("URL is required"));
        }

        let request = ShortenRequest::new(url, alias);
        request
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        debug!(url = %request.url, alias = %request.custom_alias, "Shortening URL");

        let response: ShortenResponse = self
            .client
            .post_json(&["shorten"], &request, SHORTEN_FAILED)
            .await?;

        let short_code = ShortCodeRef::new(&response.short_code)
            .map_err(|_| AppError::unexpected(SHORTEN_FAILED, Some(200)))?;

        info!(code = %short_code, "Short link created");

        Ok(ShortenResult::new(short_code, response.original_url))
    }

    /// Fetches the usage snapshot of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the backend does not know the code.
    pub async fn get_stats(&self, code: &ShortCodeRef) -> Result<StatsResult, AppError> {
        let response: StatsResponse = self
            .client
            .get_json(&["stats", code.as_str()], STATS_FAILED)
            .await?;

        let short_code = ShortCodeRef::new(&response.short_code).unwrap_or_else(|_| code.clone());

        Ok(StatsResult::new(
            short_code,
            response.click_count,
            response.created_at,
        ))
    }

    /// Requests `GET /{code}` without following the redirect.
    ///
    /// A `302` carrying a `Location` header is the success case. Depending on
    /// client settings the redirect status may arrive as a plain response or
    /// inside a transport error; both paths are funnelled into
    /// [`classify_redirect`].
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for any status other than `302`
    /// - [`AppError::Unexpected`] for a `302` without `Location`
    /// - [`AppError::Network`] when no response arrived
    pub async fn test_redirect(&self, code: &ShortCodeRef) -> Result<RedirectProbe, AppError> {
        let outcome = self
            .client
            .dispatch(self.client.request(Method::GET, &[code.as_str()]))
            .await;

        let (status, location, body) = match outcome {
            Ok(response) => read_redirect_response(response).await,
            Err(error) => match error.status() {
                Some(status) => (status, None, String::new()),
                None => return Err(AppError::from_transport(&error, REDIRECT_NOT_FOUND)),
            },
        };

        classify_redirect(status, location.as_deref(), &body)
    }

    /// Checks the liveness of the remote service.
    ///
    /// Never fails: transport errors, error statuses and malformed bodies all
    /// become an unhealthy status with a non-empty message.
    pub async fn health(&self) -> HealthStatus {
        match self
            .client
            .get_json::<HealthResponse>(&["health"], SERVICE_UNAVAILABLE)
            .await
        {
            Ok(body) if body.status.eq_ignore_ascii_case("healthy") => HealthStatus::healthy(),
            Ok(body) => HealthStatus::unhealthy(
                body.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| format!("Service reported status '{}'", body.status)),
            ),
            Err(e) => HealthStatus::unhealthy(e.message()),
        }
    }
}

#[async_trait]
impl HealthProbe for UrlService {
    async fn check(&self) -> HealthStatus {
        self.health().await
    }
}

async fn read_redirect_response(response: Response) -> (StatusCode, Option<String>, String) {
    let status = response.status();
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if status == StatusCode::FOUND {
        return (status, location, String::new());
    }

    let body = response.text().await.unwrap_or_default();
    (status, location, body)
}

/// Decides a redirect probe outcome from the raw status alone.
pub fn classify_redirect(
    status: StatusCode,
    location: Option<&str>,
    body: &str,
) -> Result<RedirectProbe, AppError> {
    if status != StatusCode::FOUND {
        let message = ErrorBody::message_from(body).unwrap_or_else(|| REDIRECT_NOT_FOUND.to_string());
        return Err(AppError::not_found(message, status.as_u16()));
    }

    match location.map(str::trim) {
        Some(location) if !location.is_empty() => Ok(RedirectProbe {
            status_code: status.as_u16(),
            location: location.to_string(),
        }),
        _ => Err(AppError::unexpected(
            "Redirect response is missing a Location header",
            Some(status.as_u16()),
        )),
    }
}

/// Picks the first human-readable message out of validation errors.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}
