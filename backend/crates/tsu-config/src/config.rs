use crate::{
    CONFIG_ENV_VAR, ConfigError, ConfigErrorResult, ContainerConfig, FeedConfig, LockConfig,
    LoggingConfig, NotificationConfig, PathsConfig, QueryConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Check versions and report, without backup, restart or notification
    pub dry_run: bool,
    pub container: ContainerConfig,
    pub paths: PathsConfig,
    pub query: QueryConfig,
    pub feed: FeedConfig,
    pub notification: NotificationConfig,
    pub logging: LoggingConfig,
    pub lock: LockConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Defaults
    /// 2. TOML file: `explicit_path`, else `$TSU_CONFIG`; no file means defaults
    /// 3. TSU_* environment variable overrides
    ///
    /// Command-line flags are layered on top by the caller. Does NOT
    /// validate - call validate() once every layer is applied.
    pub fn load(explicit_path: Option<&Path>) -> ConfigErrorResult<Self> {
        let config_path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .filter(|p| !p.as_os_str().is_empty());

        let mut config = match config_path {
            Some(ref path) => Self::load_toml(path)?,
            None => Config::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validate all configuration.
    /// Runs before the lock is taken or any collaborator is contacted.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.paths.validate(self.dry_run)?;
        self.container.validate()?;
        self.query.validate()?;
        self.feed.validate()?;
        self.notification.validate()?;

        Ok(())
    }

    /// Log configuration summary (NEVER logs the webhook URL).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  container: {} ({} via {}, timeout {}s)",
            self.container.name,
            self.container.image,
            self.container.runtime,
            self.container.timeout_secs
        );
        info!(
            "  data_dir: {}",
            self.paths
                .data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| String::from("(unset)"))
        );
        info!(
            "  backup_dir: {}",
            self.paths
                .backup_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| String::from("(unset, backup skipped)"))
        );
        info!(
            "  query: {} (timeout {}s)",
            self.query.address, self.query.timeout_secs
        );
        info!(
            "  feed: {} (timeout {}s)",
            self.feed.url, self.feed.timeout_secs
        );
        info!(
            "  notification: {}",
            if self.notification.url().is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!("  lock: {}", self.lock.path().display());

        if self.dry_run {
            info!("  dry run: no backup, restart or notification will happen");
        }
    }

    fn apply_env_overrides(&mut self) {
        Self::apply_env_bool("TSU_DRY_RUN", &mut self.dry_run);

        // Container
        Self::apply_env_string("TSU_CONTAINER_NAME", &mut self.container.name);
        Self::apply_env_string("TSU_CONTAINER_IMAGE", &mut self.container.image);
        Self::apply_env_string("TSU_CONTAINER_RUNTIME", &mut self.container.runtime);
        Self::apply_env_parse(
            "TSU_CONTAINER_TIMEOUT_SECS",
            &mut self.container.timeout_secs,
        );

        // Paths
        Self::apply_env_option_path("TSU_DATA_DIR", &mut self.paths.data_dir);
        Self::apply_env_option_path("TSU_BACKUP_DIR", &mut self.paths.backup_dir);

        // Query
        Self::apply_env_string("TSU_QUERY_ADDRESS", &mut self.query.address);
        Self::apply_env_parse("TSU_QUERY_TIMEOUT_SECS", &mut self.query.timeout_secs);

        // Feed
        Self::apply_env_string("TSU_FEED_URL", &mut self.feed.url);
        Self::apply_env_parse("TSU_FEED_TIMEOUT_SECS", &mut self.feed.timeout_secs);

        // Notification
        Self::apply_env_option_string("TSU_NOTIFICATION_URL", &mut self.notification.url);
        Self::apply_env_parse(
            "TSU_NOTIFICATION_TIMEOUT_SECS",
            &mut self.notification.timeout_secs,
        );

        // Logging
        Self::apply_env_parse("TSU_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TSU_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_path("TSU_LOG_FILE", &mut self.logging.file);

        // Lock
        Self::apply_env_option_path("TSU_LOCK_FILE", &mut self.lock.path);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for Option<PathBuf> values
    fn apply_env_option_path(var_name: &str, target: &mut Option<PathBuf>) {
        if let Some(val) = std::env::var_os(var_name) {
            *target = Some(PathBuf::from(val));
        }
    }
}
