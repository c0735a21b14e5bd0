use crate::RedactedApiKey;

/// **VALUE**: Verifies the API key never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Relay config is logged at startup with `{:?}`. A leaking Debug
/// impl would write the GROQ key into `smartnotes.log`.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual impl.
#[test]
fn given_api_key_when_formatted_then_value_is_redacted() {
    // GIVEN: A key
    let key = RedactedApiKey::new("gsk_live_secret_value");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", key);
    let display = format!("{}", key);

    // THEN: Neither contains the secret
    assert!(!debug.contains("secret"));
    assert!(!display.contains("secret"));
    assert_eq!(key.len(), "gsk_live_secret_value".len());
}

/// **VALUE**: Verifies whitespace from `.env` lines is trimmed before use.
///
/// **BUG THIS CATCHES**: Would catch a trailing `\r` from a Windows `.env` being sent in
/// the Authorization header, which providers reject with 401.
#[test]
fn given_padded_key_when_wrapped_then_bearer_header_is_trimmed() {
    let key = RedactedApiKey::new("  gsk_abc\r\n");

    assert_eq!(key.as_str(), "gsk_abc");
    assert_eq!(key.bearer(), "Bearer gsk_abc");
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch someone deriving Serialize on a config struct that
/// embeds the key and then returning it from an HTTP endpoint.
#[test]
fn given_api_key_when_serialized_then_returns_error() {
    let key = RedactedApiKey::new("gsk_abc");

    let result = serde_json::to_string(&key);

    assert!(result.is_err());
}

#[test]
fn given_default_key_when_checked_then_is_empty() {
    assert!(RedactedApiKey::default().is_empty());
}
