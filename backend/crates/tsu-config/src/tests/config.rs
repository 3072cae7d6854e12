use crate::tests::{EnvGuard, write_config};
use crate::{CONFIG_ENV_VAR, Config, ConfigError};

use std::path::{Path, PathBuf};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Loading
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);

    // When
    let config = Config::load(None).unwrap();

    // Then
    assert_that!(config.container.name.as_str(), eq("ts3-server"));
    assert_that!(config.container.image.as_str(), eq("aheil/teamspeak3-server"));
    assert_that!(config.container.runtime.as_str(), eq("docker"));
    assert_that!(config.query.address.as_str(), eq("127.0.0.1:10011"));
    assert_that!(
        config.feed.url.as_str(),
        eq("https://www.server-residenz.com/tools/ts3versions.json")
    );
    assert!(config.paths.data_dir().is_none());
    assert!(config.paths.backup_dir().is_none());
    assert!(config.notification.url().is_none());
    assert_that!(config.dry_run, eq(false));
}

#[test]
#[serial]
fn given_toml_file_when_load_then_uses_toml_values() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let (_temp, path) = write_config(
        r#"
            [container]
            name = "voice"
            timeout_secs = 60

            [paths]
            data_dir = "/srv/ts3/data"
            backup_dir = "/srv/ts3/backup"

            [notification]
            url = "https://hooks.slack.com/services/T000/B000/XXXX"

            [logging]
            level = "debug"
        "#,
    );

    // When
    let config = Config::load(Some(&path)).unwrap();

    // Then
    assert_that!(config.container.name.as_str(), eq("voice"));
    assert_that!(config.container.timeout_secs, eq(60));
    assert_eq!(config.paths.data_dir(), Some(Path::new("/srv/ts3/data")));
    assert_eq!(config.paths.backup_dir(), Some(Path::new("/srv/ts3/backup")));
    assert!(config.notification.url().is_some());
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_config_env_var_when_load_then_reads_that_file() {
    // Given
    let (_temp, path) = write_config("[container]\nname = \"from-env-file\"\n");
    let _env = EnvGuard::set(CONFIG_ENV_VAR, path.to_str().unwrap());

    // When
    let config = Config::load(None).unwrap();

    // Then
    assert_that!(config.container.name.as_str(), eq("from-env-file"));
}

#[test]
#[serial]
fn given_missing_explicit_file_when_load_then_io_error() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let path = PathBuf::from("/nonexistent/tsu/config.toml");

    // When
    let result = Config::load(Some(&path));

    // Then
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let (_temp, path) = write_config("[container\nname = ");

    // When
    let result = Config::load(Some(&path));

    // Then
    assert!(matches!(result, Err(ConfigError::Toml { .. })));
}

#[test]
#[serial]
fn given_invalid_log_level_when_load_then_falls_back_to_info() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let (_temp, path) = write_config("[logging]\nlevel = \"loud\"\n");

    // When
    let config = Config::load(Some(&path)).unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

// =========================================================================
// Environment overrides
// =========================================================================

#[test]
#[serial]
fn given_env_overrides_when_load_then_env_wins_over_toml() {
    // Given
    let (_temp, path) = write_config("[container]\nname = \"from-toml\"\n");
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let _name = EnvGuard::set("TSU_CONTAINER_NAME", "from-env");
    let _data = EnvGuard::set("TSU_DATA_DIR", "/data");
    let _timeout = EnvGuard::set("TSU_FEED_TIMEOUT_SECS", "5");
    let _dry = EnvGuard::set("TSU_DRY_RUN", "1");

    // When
    let config = Config::load(Some(&path)).unwrap();

    // Then
    assert_that!(config.container.name.as_str(), eq("from-env"));
    assert_eq!(config.paths.data_dir(), Some(Path::new("/data")));
    assert_that!(config.feed.timeout_secs, eq(5));
    assert_that!(config.dry_run, eq(true));
}

#[test]
#[serial]
fn given_unparseable_numeric_env_when_load_then_keeps_default() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let _timeout = EnvGuard::set("TSU_QUERY_TIMEOUT_SECS", "soon");

    // When
    let config = Config::load(None).unwrap();

    // Then
    assert_that!(
        config.query.timeout_secs,
        eq(crate::query_config::DEFAULT_QUERY_TIMEOUT_SECS)
    );
}

#[test]
#[serial]
fn given_empty_notification_url_env_when_load_then_notification_disabled() {
    // Given
    let _env = EnvGuard::remove(CONFIG_ENV_VAR);
    let _url = EnvGuard::set("TSU_NOTIFICATION_URL", "");

    // When
    let config = Config::load(None).unwrap();

    // Then
    assert!(config.notification.url().is_none());
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn given_dry_run_without_data_dir_when_validate_then_ok() {
    let config = Config {
        dry_run: true,
        ..Config::default()
    };

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_empty_container_name_when_validate_then_error() {
    let mut config = Config {
        dry_run: true,
        ..Config::default()
    };
    config.container.name = String::from("  ");

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_container_name_with_space_when_validate_then_error() {
    let mut config = Config {
        dry_run: true,
        ..Config::default()
    };
    config.container.name = String::from("ts3 server");

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_non_http_feed_url_when_validate_then_error() {
    let mut config = Config {
        dry_run: true,
        ..Config::default()
    };
    config.feed.url = String::from("ftp://example.com/versions.json");

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_non_http_notification_url_when_validate_then_error_without_url() {
    let mut config = Config {
        dry_run: true,
        ..Config::default()
    };
    config.notification.url = Some(String::from("hooks.slack.com/secret-token"));

    let message = config.validate().unwrap_err().to_string();

    assert!(!message.contains("secret-token"));
}

#[test]
fn given_query_address_without_port_when_validate_then_error() {
    let mut config = Config {
        dry_run: true,
        ..Config::default()
    };
    config.query.address = String::from("localhost");

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_no_lock_path_when_path_then_temp_dir_default() {
    let config = Config::default();

    assert_eq!(
        config.lock.path(),
        std::env::temp_dir().join("ts3-updater.lock")
    );
}
