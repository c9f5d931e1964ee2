use crate::{Config, WeatherQuery, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Why a lookup failed. Callers outside this crate only ever see
/// [`crate::model::GENERIC_ERROR_MESSAGE`]; the variants exist for logs and tests.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("City must not be empty")]
    EmptyQuery,

    #[error("Failed to reach weather provider: {0}")]
    Network(reqwest::Error),

    #[error("Weather provider rejected the request with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Malformed weather provider response: {0}")]
    Malformed(String),
}

// reqwest errors carry the request URL, and ours ends in `appid=<key>`.
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.without_url())
    }
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::EmptyQuery => "empty_query",
            ProviderError::Network(_) => "network",
            ProviderError::Rejected { .. } => "rejected",
            ProviderError::Malformed(_) => "malformed",
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, ProviderError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: the provider rejects the request and
/// the lookup renders the generic message, same as any other failure.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = config.api_key.clone().unwrap_or_else(|| {
        tracing::warn!("No OpenWeather API key configured; every lookup will fail");
        String::new()
    });

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url),
        None => OpenWeatherProvider::new(api_key),
    };

    Box::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let rejected = ProviderError::Rejected {
            status: StatusCode::NOT_FOUND,
            body: "city not found".into(),
        };
        let malformed = ProviderError::Malformed("missing field `main`".into());

        assert_eq!(ProviderError::EmptyQuery.kind(), "empty_query");
        assert_eq!(rejected.kind(), "rejected");
        assert_eq!(malformed.kind(), "malformed");
    }

    #[test]
    fn rejected_error_mentions_status() {
        let err = ProviderError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            body: "Invalid API key".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://127.0.0.1:9".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg);
        let debug = format!("{provider:?}");
        assert!(debug.contains("http://127.0.0.1:9"));
    }
}
