//! Client configuration.

use std::time::Duration;

use cleanslate_core::Error;
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_MAX_RETRIES: u32 = 1;
/// Upper bound on retries; larger requests are clamped.
pub const MAX_RETRIES_LIMIT: u32 = 3;

const MISSING_KEY_MESSAGE: &str = "API key is required. Set CLEANSLATE_API_KEY.";
const BASE_URL_MESSAGE: &str = "Base URL must be a full URL, for example https://api.cleanslate.sh/v1";

/// Everything a transport needs to reach the service. Built once at startup
/// and moved into the client that uses it.
#[derive(Debug)]
pub struct ClientConfig {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Authentication(MISSING_KEY_MESSAGE.into()));
        }

        let base_url = base_url.into();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(Error::validation(BASE_URL_MESSAGE));
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Deadline for one logical call, retries included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.min(MAX_RETRIES_LIMIT);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanslate_core::ErrorKind;

    #[test]
    fn test_empty_key_rejected() {
        let err = ClientConfig::new("   ", "https://api.test.com/v1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(err.message().contains("CLEANSLATE_API_KEY"));
    }

    #[test]
    fn test_base_url_must_parse() {
        let err = ClientConfig::new("key", "not a url").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = ClientConfig::new("key", "https://api.test.com/v1/").unwrap();
        assert_eq!(config.base_url(), "https://api.test.com/v1");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);

        let config = config
            .with_timeout(Duration::from_millis(250))
            .with_max_retries(9);
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.max_retries(), MAX_RETRIES_LIMIT);
    }

    #[test]
    fn test_key_hidden_from_debug() {
        let config = ClientConfig::new("super-secret-key", "https://api.test.com").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert_eq!(config.api_key(), "super-secret-key");
    }
}
