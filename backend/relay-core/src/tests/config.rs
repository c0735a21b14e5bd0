// Unit tests for RelayConfig load/save/validate

use crate::config::{PORT_ENV, RelayConfig};
use crate::error::ConfigError;
use crate::{DEFAULT_MODEL, DEFAULT_SERVER_PORT, DEFAULT_UPSTREAM_BASE_URL};

use serial_test::serial;
use tempfile::TempDir;

/// **VALUE**: Verifies a missing config file yields the documented defaults.
///
/// **WHY THIS MATTERS**: First run has no config.json. The relay must come up on port 3000
/// talking to Groq with the llama model, exactly like the original Node relay.
///
/// **BUG THIS CATCHES**: Would catch a missing-file path returning an error and aborting startup.
#[test]
fn given_missing_file_when_loading_then_returns_defaults() {
    // GIVEN: An empty config directory
    let dir = TempDir::new().unwrap();

    // WHEN: Loading
    let config = RelayConfig::load(dir.path()).unwrap();

    // THEN: Defaults apply
    assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
    assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
    assert_eq!(config.upstream.model, DEFAULT_MODEL);
    assert_eq!(config.api_key_env, "GROQ_API_KEY");
}

/// **VALUE**: Verifies a partial file keeps unspecified fields at their defaults.
///
/// **BUG THIS CATCHES**: Would catch a `#[serde(default)]` dropped from a section, which
/// would make every hand-written config.json fail to parse.
#[test]
fn given_partial_file_when_loading_then_missing_fields_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"upstream": {"model": "llama-3.1-8b-instant"}}"#,
    )
    .unwrap();

    let config = RelayConfig::load(dir.path()).unwrap();

    assert_eq!(config.upstream.model, "llama-3.1-8b-instant");
    assert_eq!(config.upstream.timeout_secs, 60);
    assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
}

/// **VALUE**: Verifies a corrupt file is reported, not silently replaced by defaults.
///
/// **WHY THIS MATTERS**: Silently ignoring a typo would send notes to the default provider
/// when the operator configured a different one.
#[test]
fn given_corrupt_file_when_loading_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = RelayConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies a saved config loads back identically and leaves no temp file.
///
/// **BUG THIS CATCHES**: Would catch the temp-file rename being skipped.
#[test]
fn given_saved_config_when_loaded_then_matches_and_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let mut config = RelayConfig::default();
    config.server.port = 4100;
    config.upstream.temperature = Some(0.2);

    config.save(dir.path()).unwrap();
    let loaded = RelayConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn given_invalid_values_when_validating_then_each_is_rejected() {
    let mut bad_version = RelayConfig::default();
    bad_version.version = 0;

    let mut bad_url = RelayConfig::default();
    bad_url.upstream.base_url = String::from("api.groq.com/openai/v1");

    let mut bad_timeout = RelayConfig::default();
    bad_timeout.upstream.timeout_secs = 0;

    let mut bad_model = RelayConfig::default();
    bad_model.upstream.model = String::from("  ");

    let mut bad_temperature = RelayConfig::default();
    bad_temperature.upstream.temperature = Some(3.5);

    for config in [bad_version, bad_url, bad_timeout, bad_model, bad_temperature] {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "expected validation error for {:?}",
            config
        );
    }
}

/// **VALUE**: Verifies `SMARTNOTES_PORT` overrides the file value.
///
/// **WHY THIS MATTERS**: Container deployments set the port via environment only.
#[test]
#[serial]
fn given_port_env_when_applying_overrides_then_port_replaced() {
    let mut config = RelayConfig::default();
    // SAFETY: serialized with other env-mutating tests.
    unsafe { std::env::set_var(PORT_ENV, "8088") };

    let result = config.apply_env_overrides();

    unsafe { std::env::remove_var(PORT_ENV) };
    assert!(result.is_ok());
    assert_eq!(config.server.port, 8088);
}

/// **VALUE**: Verifies a non-numeric port override is an error rather than ignored.
#[test]
#[serial]
fn given_garbage_port_env_when_applying_overrides_then_returns_error() {
    let mut config = RelayConfig::default();
    // SAFETY: serialized with other env-mutating tests.
    unsafe { std::env::set_var(PORT_ENV, "three-thousand") };

    let result = config.apply_env_overrides();

    unsafe { std::env::remove_var(PORT_ENV) };
    assert!(matches!(result, Err(ConfigError::EnvOverride { .. })));
    assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
}
