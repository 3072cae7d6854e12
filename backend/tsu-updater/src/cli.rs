use crate::UpdaterResult;

use std::path::PathBuf;

use clap::Parser;
use tsu_config::{Config, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "ts3-updater")]
#[command(about = "Recreate a TeamSpeak 3 server container when a newer release is published")]
#[command(version)]
pub struct Cli {
    /// TOML config file (defaults to $TSU_CONFIG when set)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Container name
    #[arg(short = 'c', long)]
    pub container_name: Option<String>,

    /// Data directory on the host (absolute path); required unless --dry-run
    #[arg(short = 'd', long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Backup directory (absolute path); backups are skipped when empty
    #[arg(short = 'b', long, value_name = "PATH")]
    pub backup_dir: Option<String>,

    /// Slack incoming-webhook URL; notifications are skipped when empty
    #[arg(short = 'n', long, value_name = "URL")]
    pub notification_url: Option<String>,

    /// Image used to recreate the container
    #[arg(long)]
    pub image: Option<String>,

    /// ServerQuery address of the running server (host:port)
    #[arg(long, value_name = "ADDR")]
    pub query_address: Option<String>,

    /// Version feed URL
    #[arg(long, value_name = "URL")]
    pub feed_url: Option<String>,

    /// Lock file guarding against overlapping runs
    #[arg(long, value_name = "PATH")]
    pub lock_file: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        ignore_case = true,
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: Option<String>,

    /// Append logs to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Only check versions; never back up, restart or notify
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Load the config file and environment, then layer these flags on top.
    /// Not validated.
    pub fn load_config(&self) -> UpdaterResult<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Flags win over every other configuration source.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref name) = self.container_name {
            config.container.name = name.clone();
        }
        if let Some(ref dir) = self.data_dir {
            config.paths.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(ref dir) = self.backup_dir {
            config.paths.backup_dir = Some(PathBuf::from(dir));
        }
        if let Some(ref url) = self.notification_url {
            config.notification.url = Some(url.clone());
        }
        if let Some(ref image) = self.image {
            config.container.image = image.clone();
        }
        if let Some(ref address) = self.query_address {
            config.query.address = address.clone();
        }
        if let Some(ref url) = self.feed_url {
            config.feed.url = url.clone();
        }
        if let Some(ref path) = self.lock_file {
            config.lock.path = Some(path.clone());
        }
        if let Some(ref level) = self.log_level
            && let Ok(parsed) = level.parse::<LogLevel>()
        {
            config.logging.level = parsed;
        }
        if let Some(ref path) = self.log_file {
            config.logging.file = Some(path.clone());
        }
        if self.no_color {
            config.logging.colored = false;
        }
        if self.dry_run {
            config.dry_run = true;
        }
    }
}
