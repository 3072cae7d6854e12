use crate::ContainerStep;

use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid version '{value}': {reason} {location}")]
    InvalidVersion {
        value: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Instance query failed: {message} {location}")]
    Query {
        message: String,
        location: ErrorLocation,
    },

    #[error("Version feed unavailable: {message} {location}")]
    Feed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Backup failed for {path}: {source} {location}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Container {step} step failed: {message} {location}")]
    Container {
        step: ContainerStep,
        message: String,
        output: String,
        location: ErrorLocation,
    },

    #[error(
        "Container '{container}' was removed but could not be recreated, the service is DOWN: {message} {location}"
    )]
    ServiceDown {
        container: String,
        message: String,
        output: String,
        location: ErrorLocation,
    },

    #[error("Notification failed: {message} {location}")]
    Notification {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn invalid_version<V: Into<String>, R: Into<String>>(value: V, reason: R) -> Self {
        CoreError::InvalidVersion {
            value: value.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn query<S: Into<String>>(message: S) -> Self {
        CoreError::Query {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn feed<S: Into<String>>(message: S) -> Self {
        CoreError::Feed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backup(path: PathBuf, source: std::io::Error) -> Self {
        CoreError::Backup {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn container<S: Into<String>>(step: ContainerStep, message: S, output: String) -> Self {
        CoreError::Container {
            step,
            message: message.into(),
            output,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn notification<S: Into<String>>(message: S) -> Self {
        CoreError::Notification {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Re-classify a failed `run` that followed a successful `remove`.
    #[track_caller]
    pub fn into_service_down(self, container: &str) -> Self {
        let (message, output) = match self {
            CoreError::Container {
                message, output, ..
            } => (message, output),
            other => (other.to_string(), String::new()),
        };

        CoreError::ServiceDown {
            container: container.to_string(),
            message,
            output,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Captured runtime output, if the error came from a container command.
    pub fn command_output(&self) -> Option<&str> {
        match self {
            Self::Container { output, .. } | Self::ServiceDown { output, .. } => {
                Some(output.as_str())
            }
            _ => None,
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidVersion { .. } => {
                "A version string could not be compared. \
                   Check the ServerQuery output and the version feed contents."
            }
            Self::Query { .. } => {
                "The running server did not answer the version query. \
                   Check that the container is up and the ServerQuery port is reachable."
            }
            Self::Feed { .. } => {
                "The version feed could not be read. \
                   Check network access and the feed URL."
            }
            Self::Backup { .. } => {
                "The database backup could not be written, the container was left untouched. \
                   Check the data directory, permissions and free disk space."
            }
            Self::Container { .. } => {
                "The container runtime rejected the command. \
                   Inspect the captured output above."
            }
            Self::ServiceDown { .. } => {
                "The voice server is NOT running. \
                   Start the container manually, then investigate the captured output."
            }
            Self::Notification { .. } => "The chat notification could not be delivered.",
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
