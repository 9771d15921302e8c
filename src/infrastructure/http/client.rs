//! Shared HTTP client for the remote short-code service.
//!
//! One [`RequestClient`] holds the base endpoint, default headers, timeout
//! and the request/response hooks. Operations only name path segments.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::interceptors::{
    BearerToken, CredentialProvider, LogUnauthorized, NoCredentials, ResponseObserver,
};
use super::response::normalize_response;
use crate::config::Config;
use crate::error::AppError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configured transport shared by every operation.
///
/// Created with:
/// - JSON `Content-Type` and `Accept` headers
/// - A uniform per-call timeout
/// - Redirect following disabled, so `GET /{code}` can be inspected
#[derive(Clone)]
pub struct RequestClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    observer: Arc<dyn ResponseObserver>,
}

impl RequestClient {
    /// Builds a client for `base_url` with the default hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: '{base_url}'");
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            credentials: Arc::new(NoCredentials),
            observer: Arc::new(LogUnauthorized),
        })
    }

    /// Builds a client from loaded configuration, attaching a bearer token
    /// when `API_TOKEN` is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(&config.api_base_url, config.request_timeout())?;

        Ok(match &config.api_token {
            Some(token) => client.with_credentials(Arc::new(BearerToken::new(token.clone()))),
            None => client,
        })
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base endpoint, percent-encoding each one.
    ///
    /// ```
    /// use std::time::Duration;
    /// use shortlink_client::infrastructure::http::RequestClient;
    ///
    /// let client = RequestClient::new("https://s.example.com/api", Duration::from_secs(10)).unwrap();
    /// assert_eq!(
    ///     client.endpoint(&["stats", "abc"]).as_str(),
    ///     "https://s.example.com/api/stats/abc"
    /// );
    /// ```
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts a request with the credential hook applied.
    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(segments));

        match self.credentials.authorization() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Sends a prepared request and notifies the observer of `401`s.
    ///
    /// The raw `reqwest` result is returned untouched, for callers that must
    /// inspect both the success and the failure path themselves.
    pub async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        let response = builder.send().await?;

        debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            "Response received"
        );

        if response.status() == StatusCode::UNAUTHORIZED {
            self.observer.on_unauthorized(response.url());
        }

        Ok(response)
    }

    /// `GET`s `segments` and decodes the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        fallback: &str,
    ) -> Result<T, AppError> {
        let response = self
            .dispatch(self.request(Method::GET, segments))
            .await
            .map_err(|e| AppError::from_transport(&e, fallback))?;

        normalize_response(response, fallback).await
    }

    /// `POST`s `body` as JSON to `segments` and decodes the reply as `T`.
    pub async fn post_json<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .dispatch(self.request(Method::POST, segments).json(body))
            .await
            .map_err(|e| AppError::from_transport(&e, fallback))?;

        normalize_response(response, fallback).await
    }
}
