use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;
use tsu_config::ConfigError;
use tsu_core::CoreError;

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Update(#[from] CoreError),

    #[error("Another update run is in progress ({owner}, lock file: {path}) {location}")]
    AlreadyRunning {
        path: PathBuf,
        owner: String,
        location: ErrorLocation,
    },

    #[error("Failed to acquire lock at {path}: {source} {location}")]
    LockAcquisition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to build HTTP client: {source} {location}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl UpdaterError {
    #[track_caller]
    pub fn lock_acquisition(path: PathBuf, source: std::io::Error) -> Self {
        Self::LockAcquisition {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Config(_) => {
                "Configuration has invalid settings. \
                   Check the flags, TSU_* variables and the config file."
            }
            Self::Update(e) => e.recovery_hint(),
            Self::AlreadyRunning { .. } => {
                "A previous run has not finished yet. \
                   Make sure the scheduler waits for completion."
            }
            Self::LockAcquisition { .. } => {
                "Unable to create the lock file. \
                   Check permissions on its directory or set lock.path."
            }
            Self::HttpClient { .. } => "The TLS backend could not be initialized.",
            Self::Logger { .. } => "Check that the log file location is writable.",
        }
    }
}

impl From<reqwest::Error> for UpdaterError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::HttpClient {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
