//! Environment-provided configuration.
//!
//! The client needs nothing beyond a base URL; the analytics ID and the
//! bot-challenge site key are passed through to page code untouched.

use std::env;

/// Environment variable naming the API base URL.
pub const BASE_URL_ENV: &str = "CPC_API_BASE_URL";

/// Environment variable for the analytics measurement ID.
pub const ANALYTICS_ID_ENV: &str = "CPC_ANALYTICS_ID";

/// Environment variable for the bot-challenge site key.
pub const CAPTCHA_SITE_KEY_ENV: &str = "CPC_CAPTCHA_SITE_KEY";

/// Base URL used when the environment provides none.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL all endpoint paths are joined onto, without trailing slash.
    pub base_url: String,
    /// Analytics measurement ID, if configured.
    pub analytics_id: Option<String>,
    /// Bot-challenge site key, if configured.
    pub captcha_site_key: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(&base_url),
            analytics_id: env::var(ANALYTICS_ID_ENV).ok(),
            captcha_site_key: env::var(CAPTCHA_SITE_KEY_ENV).ok(),
        }
    }

    /// Build a configuration around an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            analytics_id: None,
            captcha_site_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::with_base_url("https://api.example.edu/api/");
        assert_eq!(config.base_url, "https://api.example.edu/api");
    }
}
