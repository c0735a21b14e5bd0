// Unit tests for config/log directory resolution

use crate::config::paths::{CONFIG_DIR_ENV, LOG_DIR_ENV};
use crate::config::{PathSource, SmartnotesPaths};

use serial_test::serial;

/// **VALUE**: Verifies environment overrides win over platform directories.
///
/// **WHY THIS MATTERS**: Tests, containers and portable installs all point the relay at
/// their own directories this way.
#[test]
#[serial]
fn given_env_overrides_when_detecting_then_env_paths_used() {
    // SAFETY: serialized with other env-mutating tests.
    unsafe {
        std::env::set_var(CONFIG_DIR_ENV, "/tmp/smartnotes-config");
        std::env::set_var(LOG_DIR_ENV, " /tmp/smartnotes-logs ");
    }

    let paths = SmartnotesPaths::detect();

    unsafe {
        std::env::remove_var(CONFIG_DIR_ENV);
        std::env::remove_var(LOG_DIR_ENV);
    }
    assert_eq!(paths.config_dir.to_str(), Some("/tmp/smartnotes-config"));
    assert_eq!(paths.config_source, PathSource::EnvVar);
    assert_eq!(paths.log_dir.to_str(), Some("/tmp/smartnotes-logs"));
    assert_eq!(paths.log_source, PathSource::EnvVar);
}

#[test]
#[serial]
fn given_no_overrides_when_detecting_then_not_env_source() {
    unsafe {
        std::env::remove_var(CONFIG_DIR_ENV);
        std::env::remove_var(LOG_DIR_ENV);
    }

    let paths = SmartnotesPaths::detect();

    assert_ne!(paths.config_source, PathSource::EnvVar);
    assert!(paths.config_dir.ends_with("smartnotes") || paths.config_dir.ends_with("."));
    assert!(paths.log_dir.ends_with("logs"));
}
