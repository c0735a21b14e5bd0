use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures talking to the chat-completion provider.
#[derive(Debug, ThisError)]
pub enum LlmClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Error: HTTP {status_code} - {message} {location}")]
    Upstream {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl LlmClientError {
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            LlmClientError::Upstream { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<url::ParseError> for LlmClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        LlmClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for LlmClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return LlmClientError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        LlmClientError::Http {
            is_timeout: error.is_timeout(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for LlmClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        LlmClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
