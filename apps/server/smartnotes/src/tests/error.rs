// Unit tests for start-up error conversion

use crate::error::SmartnotesError;

use relay_core::error::{ConfigError, ServerError};

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies library errors keep their message when flattened.
///
/// **WHY THIS MATTERS**: The binary prints this to stderr on a failed start; it is the
/// only clue an operator gets about a bad config.json.
#[test]
fn given_config_error_when_converted_then_message_preserved() {
    let err: SmartnotesError = ConfigError::ValidationError {
        reason: String::from("upstream.model cannot be empty"),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert!(matches!(err, SmartnotesError::Config { .. }));
    assert!(err.to_string().contains("upstream.model cannot be empty"));
}

#[test]
fn given_bind_error_when_converted_then_server_variant() {
    let err: SmartnotesError = ServerError::Bind {
        address: String::from("127.0.0.1:3000"),
        message: String::from("Address already in use"),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert!(matches!(err, SmartnotesError::Server { .. }));
    assert!(err.to_string().contains("127.0.0.1:3000"));
}

/// **VALUE**: Verifies errors serialize with a type tag for structured output.
#[test]
fn given_smartnotes_error_when_serialized_then_tagged() {
    let err = SmartnotesError::Smartnotes {
        message: String::from("Failed to create log directory"),
        location: ErrorLocation::from(Location::caller()),
    };

    let json = serde_json::to_string(&err).unwrap();

    assert!(json.contains("\"type\":\"Smartnotes\""));
    assert!(json.contains("Failed to create log directory"));
}
