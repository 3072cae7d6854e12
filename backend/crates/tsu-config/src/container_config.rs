use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CONTAINER_IMAGE, DEFAULT_CONTAINER_NAME,
    DEFAULT_CONTAINER_RUNTIME, MAX_CONTAINER_TIMEOUT_SECS, validate_timeout,
};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CONTAINER_TIMEOUT_SECS: u64 = 120;

/// Container runtime settings for the managed voice server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Name given to the container (`--name=`)
    pub name: String,
    /// Image reference passed to `run`
    pub image: String,
    /// Container runtime executable
    pub runtime: String,
    /// Upper bound for each runtime invocation
    pub timeout_secs: u64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_CONTAINER_NAME),
            image: String::from(DEFAULT_CONTAINER_IMAGE),
            runtime: String::from(DEFAULT_CONTAINER_RUNTIME),
            timeout_secs: DEFAULT_CONTAINER_TIMEOUT_SECS,
        }
    }
}

impl ContainerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::container("container.name cannot be empty"));
        }

        if self.name.chars().any(char::is_whitespace) {
            return Err(ConfigError::container(format!(
                "container.name cannot contain whitespace, got '{}'",
                self.name
            )));
        }

        if self.image.trim().is_empty() {
            return Err(ConfigError::container("container.image cannot be empty"));
        }

        if self.runtime.trim().is_empty() {
            return Err(ConfigError::container("container.runtime cannot be empty"));
        }

        validate_timeout(
            "container.timeout_secs",
            self.timeout_secs,
            MAX_CONTAINER_TIMEOUT_SECS,
        )
    }
}
