//! Client configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is issued. The remote base endpoint is chosen by deployment environment,
//! never computed per call.
//!
//! ## Deployment Environments
//!
//! ### Development (default)
//!
//! ```bash
//! export APP_ENV="development"   # talks to http://localhost:8080 directly
//! ```
//!
//! ### Production (behind the reverse proxy)
//!
//! ```bash
//! export APP_ENV="production"
//! export PUBLIC_ORIGIN="https://s.example.com"   # API at https://s.example.com/api
//! ```
//!
//! `API_BASE_URL` overrides the environment-derived endpoint in both modes.
//!
//! ## Optional Variables
//!
//! - `PUBLIC_ORIGIN` - Origin used for short links and the redirect opener (default: `http://localhost:3000`)
//! - `SERVICE_PATH_PREFIX` - Proxy path prefix (default: `/api/`)
//! - `REQUEST_TIMEOUT_SECS` - Per-call timeout (default: 10)
//! - `HEALTH_INTERVAL_SECS` - Health polling period (default: 30)
//! - `API_TOKEN` - Bearer credential attached to every request
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

const DEV_API_BASE: &str = "http://localhost:8080";
const DEFAULT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_PATH_PREFIX: &str = "/api/";

/// Deployment environment selecting the remote base endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    /// Direct connection to the gateway on localhost.
    Development,
    /// Reverse-proxied under `{origin}/api`.
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => anyhow::bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    /// Base endpoint every operation path is appended to.
    pub api_base_url: String,
    /// Origin of the public short links (`{origin}/{code}`).
    pub public_origin: String,
    /// Literal path prefix of the reverse proxy, e.g. `/api/`.
    pub path_prefix: String,
    pub request_timeout_secs: u64,
    pub health_interval_secs: u64,
    /// Optional bearer token. Never logged.
    pub api_token: Option<String>,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_ENV` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let app_env = match env::var("APP_ENV") {
            Ok(value) => AppEnv::parse(&value).context("Failed to load deployment environment")?,
            Err(_) => AppEnv::Development,
        };

        let public_origin = env::var("PUBLIC_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_base_url = Self::load_api_base_url(app_env, &public_origin);

        let path_prefix =
            env::var("SERVICE_PATH_PREFIX").unwrap_or_else(|_| DEFAULT_PATH_PREFIX.to_string());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let health_interval_secs = env::var("HEALTH_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let api_token = env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            app_env,
            api_base_url,
            public_origin,
            path_prefix,
            request_timeout_secs,
            health_interval_secs,
            api_token,
            log_level,
            log_format,
        })
    }

    /// Resolves the API base endpoint.
    ///
    /// Priority:
    /// 1. `API_BASE_URL` environment variable
    /// 2. Derived from the deployment environment
    fn load_api_base_url(app_env: AppEnv, public_origin: &str) -> String {
        if let Ok(url) = env::var("API_BASE_URL") {
            return url.trim_end_matches('/').to_string();
        }

        match app_env {
            AppEnv::Development => DEV_API_BASE.to_string(),
            AppEnv::Production => format!("{}/api", public_origin),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_base_url` or `public_origin` is not an absolute http(s) URL
    /// - `path_prefix` does not start and end with `/`
    /// - `request_timeout_secs` is outside 1..=300
    /// - `health_interval_secs` is outside 1..=3600
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        validate_http_url("API_BASE_URL", &self.api_base_url)?;
        validate_http_url("PUBLIC_ORIGIN", &self.public_origin)?;

        if !self.path_prefix.starts_with('/') || !self.path_prefix.ends_with('/') {
            anyhow::bail!(
                "SERVICE_PATH_PREFIX must start and end with '/', got '{}'",
                self.path_prefix
            );
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECS must be between 1 and 300, got {}",
                self.request_timeout_secs
            );
        }

        if self.health_interval_secs == 0 || self.health_interval_secs > 3600 {
            anyhow::bail!(
                "HEALTH_INTERVAL_SECS must be between 1 and 3600, got {}",
                self.health_interval_secs
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {:?}", self.app_env);
        tracing::info!("  API base: {}", self.api_base_url);
        tracing::info!("  Public origin: {}", self.public_origin);
        tracing::info!("  Path prefix: {}", self.path_prefix);
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!("  Health interval: {}s", self.health_interval_secs);
        tracing::info!(
            "  API token: {}",
            self.api_token
                .as_deref()
                .map(mask_token)
                .unwrap_or_else(|| "none".to_string())
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: AppEnv::Development,
            api_base_url: DEV_API_BASE.to_string(),
            public_origin: DEFAULT_ORIGIN.to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            request_timeout_secs: 10,
            health_interval_secs: 30,
            api_token: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must start with 'http://' or 'https://', got '{value}'");
    }

    Ok(())
}

/// Masks a credential for logging, keeping only the last four characters.
///
/// - `abcdef123456` → `***3456`
/// - `abc` → `***`
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable holds an invalid value or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: callers are #[serial], so no concurrent access
        unsafe {
            for key in [
                "APP_ENV",
                "API_BASE_URL",
                "PUBLIC_ORIGIN",
                "SERVICE_PATH_PREFIX",
                "REQUEST_TIMEOUT_SECS",
                "HEALTH_INTERVAL_SECS",
                "API_TOKEN",
            ] {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdef123456"), "***3456");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("abcd"), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.request_timeout_secs = 10;

        config.health_interval_secs = 0;
        assert!(config.validate().is_err());
        config.health_interval_secs = 30;

        config.path_prefix = "api".to_string();
        assert!(config.validate().is_err());
        config.path_prefix = "/api/".to_string();

        config.api_base_url = "ftp://localhost".to_string();
        assert!(config.validate().is_err());

        config.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_app_env_parse() {
        assert_eq!(AppEnv::parse("production").unwrap(), AppEnv::Production);
        assert_eq!(AppEnv::parse("PROD").unwrap(), AppEnv::Production);
        assert_eq!(AppEnv::parse("dev").unwrap(), AppEnv::Development);
        assert!(AppEnv::parse("staging").is_err());
    }

    #[test]
    #[serial]
    fn test_development_uses_direct_endpoint() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.health_interval(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_production_uses_proxied_endpoint() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("PUBLIC_ORIGIN", "https://s.example.com/");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.public_origin, "https://s.example.com");
        assert_eq!(config.api_base_url, "https://s.example.com/api");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_api_base_url_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("API_BASE_URL", "http://gateway:8080/");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "http://gateway:8080");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_token_is_ignored() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("API_TOKEN", "   ");
        }

        let config = Config::from_env().unwrap();
        assert!(config.api_token.is_none());

        clear_env();
    }
}
