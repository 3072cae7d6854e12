use crate::Cli;

use std::path::{Path, PathBuf};

use clap::Parser;
use googletest::assert_that;
use googletest::prelude::{anything, err};
use log::LevelFilter;
use serial_test::serial;
use tempfile::TempDir;
use tsu_config::Config;

#[test]
fn test_short_flags_match_historic_interface() {
    let cli = Cli::try_parse_from([
        "ts3-updater",
        "-c",
        "voice",
        "-d",
        "/srv/ts3",
        "-b",
        "/srv/backup",
        "-n",
        "https://hooks.slack.com/services/T/B/X",
    ])
    .unwrap();

    assert_eq!(cli.container_name.as_deref(), Some("voice"));
    assert_eq!(cli.data_dir.as_deref(), Some("/srv/ts3"));
    assert_eq!(cli.backup_dir.as_deref(), Some("/srv/backup"));
    assert!(cli.notification_url.is_some());
}

#[test]
fn test_unknown_log_level_flag_is_rejected() {
    let result = Cli::try_parse_from(["ts3-updater", "--log-level", "verbose"]);

    assert_eq!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::InvalidValue
    );
}

#[test]
fn test_log_level_flag_ignores_case() {
    let cli = Cli::try_parse_from(["ts3-updater", "--log-level", "WARN"]).unwrap();
    let mut config = Config::default();

    cli.apply(&mut config);

    assert_eq!(*config.logging.level, LevelFilter::Warn);
}

#[test]
fn test_data_dir_help_mentions_dry_run() {
    use clap::CommandFactory;

    let help = Cli::command().render_help().to_string();

    assert!(help.contains("required unless --dry-run"));
}

#[test]
fn test_no_flags_leaves_config_untouched() {
    let cli = Cli::try_parse_from(["ts3-updater"]).unwrap();
    let mut config = Config::default();

    cli.apply(&mut config);

    assert_eq!(config.container.name, "ts3-server");
    assert!(config.paths.data_dir().is_none());
    assert!(!config.dry_run);
    assert!(config.logging.colored);
}

#[test]
fn test_flags_override_config() {
    let cli = Cli::try_parse_from([
        "ts3-updater",
        "--container-name",
        "voice",
        "--data-dir",
        "/srv/ts3",
        "--image",
        "teamspeak:3.13",
        "--query-address",
        "10.0.0.5:10011",
        "--feed-url",
        "http://localhost:8080/versions.json",
        "--lock-file",
        "/run/ts3-updater.lock",
        "--log-level",
        "debug",
        "--no-color",
        "--dry-run",
    ])
    .unwrap();
    let mut config = Config::default();
    config.container.name = String::from("from-file");

    cli.apply(&mut config);

    assert_eq!(config.container.name, "voice");
    assert_eq!(config.paths.data_dir(), Some(Path::new("/srv/ts3")));
    assert_eq!(config.container.image, "teamspeak:3.13");
    assert_eq!(config.query.address, "10.0.0.5:10011");
    assert_eq!(config.feed.url, "http://localhost:8080/versions.json");
    assert_eq!(config.lock.path(), PathBuf::from("/run/ts3-updater.lock"));
    assert_eq!(*config.logging.level, LevelFilter::Debug);
    assert!(!config.logging.colored);
    assert!(config.dry_run);
}

#[test]
fn test_empty_backup_and_notification_flags_disable_features() {
    let cli = Cli::try_parse_from(["ts3-updater", "-d", "/srv/ts3", "-b", "", "-n", ""]).unwrap();
    let mut config = Config::default();

    cli.apply(&mut config);

    assert!(config.paths.backup_dir().is_none());
    assert!(config.notification.url().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_relative_data_dir_flag_fails_validation() {
    let cli = Cli::try_parse_from(["ts3-updater", "-d", "data"]).unwrap();
    let mut config = Config::default();

    cli.apply(&mut config);

    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_flag_beats_env_beats_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(
        &path,
        "[container]\nname = \"from-file\"\nimage = \"file-image\"\n\n[query]\naddress = \"10.0.0.1:10011\"\n",
    )
    .unwrap();

    // SAFETY: serialized with every other env-touching test
    unsafe {
        std::env::set_var("TSU_CONTAINER_NAME", "from-env");
        std::env::set_var("TSU_CONTAINER_IMAGE", "env-image");
    }

    let cli = Cli::try_parse_from([
        "ts3-updater",
        "--config",
        path.to_str().unwrap(),
        "-c",
        "from-flag",
    ])
    .unwrap();
    let config = cli.load_config();

    unsafe {
        std::env::remove_var("TSU_CONTAINER_NAME");
        std::env::remove_var("TSU_CONTAINER_IMAGE");
    }

    let config = config.unwrap();
    assert_eq!(config.container.name, "from-flag");
    assert_eq!(config.container.image, "env-image");
    assert_eq!(config.query.address, "10.0.0.1:10011");
}

#[test]
#[serial]
fn test_missing_config_file_is_error() {
    let cli = Cli::try_parse_from(["ts3-updater", "--config", "/nonexistent/ts3-updater.toml"])
        .unwrap();

    assert_that!(cli.load_config(), err(anything()));
}
