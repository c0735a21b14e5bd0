// Unit tests for logger initialization
// Tests focus on idempotence and error handling

use crate::logger::initialize;

use std::path::PathBuf;

/// **VALUE**: Verifies that calling initialize() twice doesn't panic or fail.
///
/// **WHY THIS MATTERS**: fern installs a process-global logger. A second install attempt
/// must be a logged no-op, not a start-up crash.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = std::env::temp_dir().join("smartnotes-test-logger-1");
    std::fs::create_dir_all(&temp_dir).unwrap();

    // WHEN: Calling initialize twice
    let first = initialize(&temp_dir);
    let second = initialize(&temp_dir);

    // THEN: Both return Ok
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");

    std::fs::remove_dir_all(&temp_dir).ok();
}

/// **VALUE**: Verifies an unusable log directory is reported, not panicked on.
///
/// **NOTE**: Shares the process-global guard with the test above. Whichever runs
/// second returns Ok without touching the path, so only the first-run case asserts
/// the error.
#[test]
fn given_invalid_log_dir_when_initialize_called_then_does_not_panic() {
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    let result = initialize(&invalid_dir);

    if let Err(err) = result {
        assert!(format!("{:?}", err).contains("Smartnotes"));
    }
}
