use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur while talking to ServerQuery
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Failed to connect to {address}: {source} {location}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Timed out after {timeout_secs}s waiting for {operation} {location}")]
    Timeout {
        operation: &'static str,
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Protocol error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server error {id}: {message} {location}")]
    Server {
        id: u32,
        message: String,
        location: ErrorLocation,
    },

    #[error("Reply is missing '{field}' {location}")]
    MissingField {
        field: String,
        location: ErrorLocation,
    },
}

impl QueryError {
    #[track_caller]
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        QueryError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn server<S: Into<String>>(id: u32, message: S) -> Self {
        QueryError::Server {
            id,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        QueryError::MissingField {
            field: field.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for QueryError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        QueryError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
