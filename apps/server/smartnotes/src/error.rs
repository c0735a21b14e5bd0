use common::ErrorLocation;

use relay_core::error::{ConfigError, LlmClientError, ServerError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Start-up and shutdown failures of the relay binary.
///
/// Library errors are flattened to their message here; the originating
/// location is kept in that message.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum SmartnotesError {
    /// Error from this binary (directories, logger, signals)
    #[error("Smartnotes Error: {message} {location}")]
    Smartnotes {
        message: String,
        location: ErrorLocation,
    },

    /// config.json or prompts.toml could not be used
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Upstream client could not be built
    #[error("Upstream Error: {message} {location}")]
    Upstream {
        message: String,
        location: ErrorLocation,
    },

    /// Relay server failed to bind or stop
    #[error("Server Error: {message} {location}")]
    Server {
        message: String,
        location: ErrorLocation,
    },
}

impl From<ConfigError> for SmartnotesError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        SmartnotesError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<LlmClientError> for SmartnotesError {
    #[track_caller]
    fn from(error: LlmClientError) -> Self {
        SmartnotesError::Upstream {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ServerError> for SmartnotesError {
    #[track_caller]
    fn from(error: ServerError) -> Self {
        SmartnotesError::Server {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
