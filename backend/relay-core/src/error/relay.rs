use crate::error::llm_client::LlmClientError;

use common::ErrorLocation;
use models::ErrorBody;

use std::panic::Location;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error as ThisError;

const SERVER_ERROR_MESSAGE: &str = "server error";
const INVALID_REQUEST_MESSAGE: &str = "invalid request body";

/// Failures surfaced to `/analyze` callers.
///
/// Only a fixed public message goes over the wire; details stay in the log.
#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error("Upstream Failure: {source} {location}")]
    Upstream {
        #[source]
        source: LlmClientError,
        location: ErrorLocation,
    },

    #[error("Invalid Request: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::Upstream { .. } => SERVER_ERROR_MESSAGE,
            RelayError::InvalidRequest { .. } => INVALID_REQUEST_MESSAGE,
        }
    }
}

impl From<LlmClientError> for RelayError {
    #[track_caller]
    fn from(error: LlmClientError) -> Self {
        RelayError::Upstream {
            source: error,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}
