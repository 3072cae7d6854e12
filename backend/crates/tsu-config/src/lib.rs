mod config;
mod container_config;
mod error;
mod feed_config;
mod lock_config;
mod log_level;
mod logging_config;
mod notification_config;
mod paths_config;
mod query_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use container_config::ContainerConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use feed_config::FeedConfig;
pub use lock_config::LockConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use notification_config::NotificationConfig;
pub use paths_config::PathsConfig;
pub use query_config::QueryConfig;

pub const CONFIG_ENV_VAR: &str = "TSU_CONFIG";

const DEFAULT_CONTAINER_NAME: &str = "ts3-server";
const DEFAULT_CONTAINER_IMAGE: &str = "aheil/teamspeak3-server";
const DEFAULT_CONTAINER_RUNTIME: &str = "docker";
const DEFAULT_QUERY_ADDRESS: &str = "127.0.0.1:10011";
const DEFAULT_FEED_URL: &str = "https://www.server-residenz.com/tools/ts3versions.json";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOCK_FILENAME: &str = "ts3-updater.lock";

// Timeout constraints (seconds)
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_NETWORK_TIMEOUT_SECS: u64 = 300;
const MAX_CONTAINER_TIMEOUT_SECS: u64 = 3600;

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn validate_timeout(field: &str, value: u64, max: u64) -> ConfigErrorResult<()> {
    if !(MIN_TIMEOUT_SECS..=max).contains(&value) {
        return Err(ConfigError::config(format!(
            "{} must be {}-{}, got {}",
            field, MIN_TIMEOUT_SECS, max, value
        )));
    }
    Ok(())
}
