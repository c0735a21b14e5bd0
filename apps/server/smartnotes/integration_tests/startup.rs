use smartnotes::app;
use smartnotes::error::SmartnotesError;

use relay_core::config::{PORT_ENV, RelayConfig};

use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, port: u16) {
    let mut config = RelayConfig::default();
    config.server.port = port;
    config.server.static_dir = dir.path().display().to_string();
    config.api_key_env = String::from("SMARTNOTES_STARTUP_TEST_KEY");
    config.save(dir.path()).expect("Failed to save config");
}

/// **VALUE**: Verifies the binary's wiring starts a working relay from a config directory.
///
/// **WHY THIS MATTERS**: This is the whole start-up path minus the logger and Ctrl-C:
/// config, key, prompts, upstream client, server. A missing key must not stop it.
///
/// **BUG THIS CATCHES**: Would catch a missing key being treated as fatal, or the
/// configured static directory not reaching the router.
#[tokio::test]
#[serial]
async fn given_config_dir_without_key_when_starting_then_relay_serves_health_and_assets() {
    // GIVEN: A config on port 0 serving its own directory as static assets
    let dir = TempDir::new().unwrap();
    write_config(&dir, 0);
    std::fs::write(dir.path().join("index.html"), "<div id=\"editor\"></div>").unwrap();

    // WHEN: Starting
    let running = app::start(dir.path()).await.expect("Startup failed");

    // THEN: Health answers and the editor page is served
    assert!(running.handle.local_addr().port() != 0);
    let health = reqwest::get(format!("{}/health", running.handle.base_url()))
        .await
        .expect("Health request failed");
    assert_eq!(health.status().as_u16(), 200);

    let index = reqwest::get(format!("{}/index.html", running.handle.base_url()))
        .await
        .expect("Index request failed");
    assert!(index.text().await.unwrap().contains("editor"));

    running.handle.shutdown().await.expect("Shutdown failed");
}

/// **VALUE**: Verifies a corrupt config.json stops start-up with a config error.
#[tokio::test]
#[serial]
async fn given_corrupt_config_when_starting_then_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{\"server\": ").unwrap();

    let result = app::start(dir.path()).await;

    assert!(matches!(result, Err(SmartnotesError::Config { .. })));
}

/// **VALUE**: Verifies the port override from the environment is applied before binding.
#[tokio::test]
#[serial]
async fn given_invalid_port_override_when_starting_then_config_error() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, 0);
    // SAFETY: serialized with other env-mutating tests.
    unsafe { std::env::set_var(PORT_ENV, "not-a-port") };

    let result = app::start(dir.path()).await;

    unsafe { std::env::remove_var(PORT_ENV) };
    assert!(matches!(result, Err(SmartnotesError::Config { .. })));
}
