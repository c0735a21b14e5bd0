use relay_core::config::{ApiKeySource, load_api_key};

use serial_test::serial;

const TEST_KEY_VAR: &str = "SMARTNOTES_TEST_PROVIDER_KEY";

/// **VALUE**: Verifies a key present in the environment is picked up and trimmed.
#[test]
#[serial]
fn given_key_in_environment_when_loading_then_key_returned() {
    // SAFETY: serialized with other env-mutating tests.
    unsafe { std::env::set_var(TEST_KEY_VAR, "  gsk-abc123  ") };

    let loaded = load_api_key(TEST_KEY_VAR);

    unsafe { std::env::remove_var(TEST_KEY_VAR) };
    assert!(!loaded.is_missing());
    assert_eq!(loaded.key.as_str(), "gsk-abc123");
    assert!(!format!("{:?}", loaded.key).contains("gsk-abc123"));
}

/// **VALUE**: Verifies a missing key is reported as missing rather than failing startup.
///
/// **WHY THIS MATTERS**: The relay still serves the editor page without a key; only
/// `/analyze` calls fail.
#[test]
#[serial]
fn given_no_key_when_loading_then_missing_source() {
    unsafe { std::env::remove_var(TEST_KEY_VAR) };

    let loaded = load_api_key(TEST_KEY_VAR);

    assert!(loaded.is_missing());
    assert_eq!(loaded.source, ApiKeySource::Missing);
    assert!(loaded.key.is_empty());
}

#[test]
#[serial]
fn given_blank_key_when_loading_then_treated_as_missing() {
    unsafe { std::env::set_var(TEST_KEY_VAR, "   ") };

    let loaded = load_api_key(TEST_KEY_VAR);

    unsafe { std::env::remove_var(TEST_KEY_VAR) };
    assert!(loaded.is_missing());
}
