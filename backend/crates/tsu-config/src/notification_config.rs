use crate::{
    ConfigError, ConfigErrorResult, MAX_NETWORK_TIMEOUT_SECS, is_http_url, validate_timeout,
};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 10;

/// Slack incoming-webhook settings. An unset or empty URL disables
/// notifications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: DEFAULT_NOTIFICATION_TIMEOUT_SECS,
        }
    }
}

impl NotificationConfig {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        // The URL embeds the webhook secret, keep it out of the message.
        if let Some(url) = self.url()
            && !is_http_url(url)
        {
            return Err(ConfigError::url(
                "notification.url must be an http(s) URL",
            ));
        }

        validate_timeout(
            "notification.timeout_secs",
            self.timeout_secs,
            MAX_NETWORK_TIMEOUT_SECS,
        )
    }
}
