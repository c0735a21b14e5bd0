use crate::Mode;

/// **VALUE**: Verifies every context-menu action name maps to its built-in mode.
///
/// **WHY THIS MATTERS**: The editor sends `data-action` values verbatim. A mismatch
/// would route `explain` through the edit prompt and the popup would never open.
///
/// **BUG THIS CATCHES**: Would catch a typo in the `From<&str>` match arms.
#[test]
fn given_builtin_names_when_parsed_then_round_trip_through_as_str() {
    let built_in = [
        Mode::Full,
        Mode::Explain,
        Mode::Answer,
        Mode::Improve,
        Mode::Grammar,
        Mode::Expand,
    ];
    for mode in built_in {
        assert_eq!(Mode::from(mode.as_str()), mode);
    }
}

/// **VALUE**: Verifies unknown names survive as `Custom` and count as edit modes.
///
/// **BUG THIS CATCHES**: Would catch unknown modes being silently coerced to `full`.
#[test]
fn given_unknown_name_when_parsed_then_kept_as_custom_edit_mode() {
    let mode = Mode::from("  Summarize ");

    assert_eq!(mode, Mode::Custom(String::from("summarize")));
    assert!(!mode.is_explain());
    assert_eq!(mode.to_string(), "summarize");
}

/// **VALUE**: Verifies blank mode falls back to `full`, matching the Ctrl+Enter default.
#[test]
fn given_blank_name_when_parsed_then_defaults_to_full() {
    assert_eq!(Mode::from(""), Mode::Full);
    assert_eq!(Mode::from("   "), Mode::Full);
}

#[test]
fn given_modes_when_checked_then_only_explain_is_explain() {
    assert!(Mode::Explain.is_explain());
    assert!(!Mode::Expand.is_explain());
    assert!(!Mode::Full.is_explain());
}

/// **VALUE**: Verifies modes serialize as bare lowercase strings.
///
/// **BUG THIS CATCHES**: Would catch a derive change turning `"improve"` into `{"Improve":null}`.
#[test]
fn given_mode_when_serialized_then_plain_string() {
    assert_eq!(serde_json::to_string(&Mode::Grammar).unwrap(), "\"grammar\"");
    let parsed: Mode = serde_json::from_str("\"EXPAND\"").unwrap();
    assert_eq!(parsed, Mode::Expand);
}
