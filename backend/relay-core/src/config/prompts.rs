//! Prompt wording, overridable through `prompts.toml`.
//!
//! ```toml
//! edit_template = """..."""       # must contain {text} and {mode}
//! explain_template = """..."""    # must contain {text}
//!
//! [instructions]
//! improve = "Rewrite for a revision sheet."
//! summarize = "Condense every section to one line."
//! ```
//!
//! Anything not overridden falls back to the built-in wording.

use crate::error::config::ConfigError;

use common::ErrorLocation;
use models::Mode;

use std::collections::HashMap;
use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const PROMPTS_FILE_NAME: &str = "prompts.toml";

pub const TEXT_PLACEHOLDER: &str = "{text}";
pub const MODE_PLACEHOLDER: &str = "{mode}";
pub const INSTRUCTIONS_PLACEHOLDER: &str = "{instructions}";

pub const BUILT_IN_EXPLAIN_TEMPLATE: &str = r#"You are an AI note-taking assistant.
Identify key concepts in the text. If a line contains a ":", treat the part before ":" as a term and the part after as its definition. Keep terms as-is and generate concise explanations if needed.
Return ONLY valid JSON between <json> and </json> tags. Do not include anything else.
<json>
{
  "highlights":[
    {"start":<start index>,"end":<end index>,"text":"<highlighted text>","explanation":"<short explanation>"}
  ]
}
</json>
Text: """{text}""""#;

pub const BUILT_IN_EDIT_TEMPLATE: &str = r#"You are a smart AI note-taking assistant.
Mode: {mode}. Your task is to edit the text as if you are taking notes.
Rules:
- If a line contains a ":", keep the term before ":" and provide a short definition or clarification.
- Preserve all original terms.
- Make edits concise and clear for studying.
{instructions}Return ONLY valid JSON between <json> and </json> tags. Do not include anything else.
<json>
{
  "updatedText": "<full document text with AI improvements inserted>",
  "feedback": "<short description of changes>"
}
</json>
Text: """{text}""""#;

fn built_in_instruction(mode: &Mode) -> Option<&'static str> {
    match mode {
        Mode::Full => Some("Work through the whole document and tidy every section."),
        Mode::Answer => Some(
            "Answer any question in the text directly beneath it and keep the question itself.",
        ),
        Mode::Improve => Some("Improve clarity and structure without dropping information."),
        Mode::Grammar => {
            Some("Fix grammar, spelling and punctuation only; do not change the meaning.")
        }
        Mode::Expand => Some(
            "Return the original text unchanged, followed by additional detail that continues it.",
        ),
        Mode::Explain | Mode::Custom(_) => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptBook {
    #[serde(default)]
    pub explain_template: Option<String>,
    #[serde(default)]
    pub edit_template: Option<String>,
    /// Extra rule line per mode name, e.g. `improve = "..."`.
    #[serde(default)]
    pub instructions: HashMap<String, String>,
}

impl PromptBook {
    /// Load prompts.toml from the config directory.
    ///
    /// Tries `{config_dir}/prompts.toml`, then `{config_dir}/config/prompts.toml`.
    ///
    /// # Returns
    ///
    /// Always returns `Ok(PromptBook)` - either loaded or built-in.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let paths = [
            config_dir.join(PROMPTS_FILE_NAME),
            config_dir.join("config").join(PROMPTS_FILE_NAME),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load_from_path(path) {
                    Ok(book) => {
                        info!("Prompts loaded from {}", path.display());
                        return Ok(book);
                    }
                    Err(e) => {
                        warn!("Failed to load prompts from {}: {}", path.display(), e);
                    }
                }
            }
        }

        info!("No prompts.toml found, using built-in prompts");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let book: PromptBook = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        book.validate()?;

        Ok(book)
    }

    /// Validate template placeholders and instruction keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(template) = &self.explain_template {
            if !template.contains(TEXT_PLACEHOLDER) {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("explain_template must contain {}", TEXT_PLACEHOLDER),
                });
            }
        }

        if let Some(template) = &self.edit_template {
            for placeholder in [TEXT_PLACEHOLDER, MODE_PLACEHOLDER] {
                if !template.contains(placeholder) {
                    return Err(ConfigError::ValidationError {
                        location: ErrorLocation::from(Location::caller()),
                        reason: format!("edit_template must contain {}", placeholder),
                    });
                }
            }
        }

        if self.instructions.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Instruction mode names cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn explain_template(&self) -> &str {
        self.explain_template
            .as_deref()
            .unwrap_or(BUILT_IN_EXPLAIN_TEMPLATE)
    }

    pub fn edit_template(&self) -> &str {
        self.edit_template.as_deref().unwrap_or(BUILT_IN_EDIT_TEMPLATE)
    }

    /// Override for `mode` if configured, otherwise the built-in line.
    pub fn instruction_for(&self, mode: &Mode) -> Option<&str> {
        self.instructions
            .get(mode.as_str())
            .map(String::as_str)
            .or_else(|| built_in_instruction(mode))
    }
}
