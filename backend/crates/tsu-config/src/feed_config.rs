use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FEED_URL, MAX_NETWORK_TIMEOUT_SECS, is_http_url,
    validate_timeout,
};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Remote version feed settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_FEED_URL),
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.url) {
            return Err(ConfigError::url(format!(
                "feed.url must be an http(s) URL, got '{}'",
                self.url
            )));
        }

        validate_timeout(
            "feed.timeout_secs",
            self.timeout_secs,
            MAX_NETWORK_TIMEOUT_SECS,
        )
    }
}
