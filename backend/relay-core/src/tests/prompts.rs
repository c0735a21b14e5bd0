// Unit tests for PromptBook loading and lookup

use crate::config::PromptBook;
use crate::config::prompts::{BUILT_IN_EDIT_TEMPLATE, BUILT_IN_EXPLAIN_TEMPLATE};
use crate::error::ConfigError;

use models::Mode;

use tempfile::TempDir;

/// **VALUE**: Verifies built-in wording is used when no prompts.toml exists.
#[test]
fn given_no_prompts_file_when_loading_then_built_ins_used() {
    let dir = TempDir::new().unwrap();

    let book = PromptBook::load(dir.path()).unwrap();

    assert_eq!(book.explain_template(), BUILT_IN_EXPLAIN_TEMPLATE);
    assert_eq!(book.edit_template(), BUILT_IN_EDIT_TEMPLATE);
    assert!(book.instruction_for(&Mode::Grammar).is_some());
}

/// **VALUE**: Verifies overrides apply per mode and custom modes can get instructions.
///
/// **WHY THIS MATTERS**: This is how an operator adds a `summarize` context-menu action
/// without a code change.
#[test]
fn given_prompts_file_when_loading_then_overrides_and_custom_modes_apply() {
    // GIVEN: prompts.toml under config/ with two instruction overrides
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config").join("prompts.toml"),
        "[instructions]\nimprove = \"Rewrite for a revision sheet.\"\nsummarize = \"One line per section.\"\n",
    )
    .unwrap();

    // WHEN: Loading
    let book = PromptBook::load(dir.path()).unwrap();

    // THEN: Overrides win, built-ins remain for the rest
    assert_eq!(
        book.instruction_for(&Mode::Improve),
        Some("Rewrite for a revision sheet.")
    );
    assert_eq!(
        book.instruction_for(&Mode::from("summarize")),
        Some("One line per section.")
    );
    assert!(book.instruction_for(&Mode::Grammar).is_some());
    assert!(book.instruction_for(&Mode::Custom(String::from("other"))).is_none());
}

/// **VALUE**: Verifies templates missing `{text}` are rejected.
///
/// **BUG THIS CATCHES**: Would catch a template override that silently drops the user's
/// notes from every prompt.
#[test]
fn given_template_without_text_placeholder_when_loading_from_path_then_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prompts.toml");
    std::fs::write(&path, "edit_template = \"Mode: {mode}\"\n").unwrap();

    let result = PromptBook::load_from_path(&path);

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

/// **VALUE**: Verifies a broken prompts.toml does not stop startup.
#[test]
fn given_broken_prompts_file_when_loading_then_falls_back_to_built_ins() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("prompts.toml"), "instructions = [").unwrap();

    let book = PromptBook::load(dir.path()).unwrap();

    assert_eq!(book, PromptBook::default());
}
