use crate::config::PromptBook;
use crate::config::prompts::{INSTRUCTIONS_PLACEHOLDER, MODE_PLACEHOLDER, TEXT_PLACEHOLDER};

use models::Mode;

/// Fill the mode's template with `text`.
///
/// The user text is substituted last so braces inside notes are never expanded.
pub fn build_prompt(book: &PromptBook, mode: &Mode, text: &str) -> String {
    if mode.is_explain() {
        return book.explain_template().replace(TEXT_PLACEHOLDER, text);
    }

    let instructions = book
        .instruction_for(mode)
        .map(|line| format!("- {}\n", line.trim()))
        .unwrap_or_default();

    book.edit_template()
        .replace(MODE_PLACEHOLDER, mode.as_str())
        .replace(INSTRUCTIONS_PLACEHOLDER, &instructions)
        .replace(TEXT_PLACEHOLDER, text)
}
