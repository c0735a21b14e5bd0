use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every relay and editor error carries an ErrorLocation. If capture
/// breaks, a 500 from `/analyze` in the log no longer points at the failing call site.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated or the
/// line/column fields are swapped.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN / WHEN: Creating ErrorLocation from the caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(location.file.contains("error_location.rs"));
    assert_eq!(location.line, 14, "Should capture correct line number");
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the `[file:line:column]` display format.
///
/// **WHY THIS MATTERS**: Every thiserror message in the workspace ends with `{location}`,
/// so this format is what shows up in `smartnotes.log`.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops the brackets or a field.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed ErrorLocation
    let location = ErrorLocation {
        file: "backend/relay-core/src/relay/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Should be bracketed with colon separators
    assert_eq!(formatted, "[backend/relay-core/src/relay/mod.rs:42:7]");
}

/// **VALUE**: Verifies that `file_name()` strips directories on both path separators.
///
/// **BUG THIS CATCHES**: Would catch Windows-built binaries logging full `src\\...` paths.
#[test]
fn given_nested_path_when_file_name_requested_then_returns_last_component() {
    let unix = ErrorLocation {
        file: "frontend/editor-core/src/document.rs",
        line: 1,
        column: 1,
    };
    let windows = ErrorLocation {
        file: "frontend\\editor-core\\src\\suggestion.rs",
        line: 1,
        column: 1,
    };

    assert_eq!(unix.file_name(), "document.rs");
    assert_eq!(windows.file_name(), "suggestion.rs");
}
