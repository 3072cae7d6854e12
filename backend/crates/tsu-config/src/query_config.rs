use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_QUERY_ADDRESS, MAX_NETWORK_TIMEOUT_SECS,
    validate_timeout,
};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// ServerQuery connection settings for the running instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// `host:port` of the ServerQuery interface
    pub address: String,
    pub timeout_secs: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            address: String::from(DEFAULT_QUERY_ADDRESS),
            timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::config("query.address cannot be empty"));
        }

        if !self.address.contains(':') {
            return Err(ConfigError::config(format!(
                "query.address must be host:port, got '{}'",
                self.address
            )));
        }

        validate_timeout(
            "query.timeout_secs",
            self.timeout_secs,
            MAX_NETWORK_TIMEOUT_SECS,
        )
    }
}
