use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{RedirectOpener, UrlService};
use crate::config::Config;
use crate::infrastructure::browser::SystemNavigator;
use crate::infrastructure::http::RequestClient;
use crate::utils::short_code::InputNormalizer;

/// Everything the interface needs, wired once from [`Config`].
#[derive(Clone)]
pub struct AppState {
    pub urls: UrlService,
    pub normalizer: InputNormalizer,
    pub opener: RedirectOpener,
    pub public_origin: String,
}

impl AppState {
    pub fn new(
        urls: UrlService,
        normalizer: InputNormalizer,
        opener: RedirectOpener,
        public_origin: impl Into<String>,
    ) -> Self {
        Self {
            urls,
            normalizer,
            opener,
            public_origin: public_origin.into(),
        }
    }

    /// Builds the shared transport and every service on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built for the
    /// configured base endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = RequestClient::from_config(config)?;

        Ok(Self::new(
            UrlService::new(client),
            InputNormalizer::new(&config.path_prefix),
            RedirectOpener::from_config(config, Arc::new(SystemNavigator)),
            &config.public_origin,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let config = Config::default();
        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.public_origin, "http://localhost:3000");
        assert_eq!(state.normalizer.normalize("http://localhost:3000/api/abc"), "abc");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };

        assert!(AppState::from_config(&config).is_err());
    }
}
