//! Requested transformation type.

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// What the relay should do with the submitted text.
///
/// Unknown names are kept verbatim as [`Mode::Custom`] and treated as edit modes,
/// so a client can experiment with new context-menu actions without a relay release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Whole-document note pass (Ctrl+Enter).
    #[default]
    Full,
    /// Highlight key concepts and explain them.
    Explain,
    /// Answer a question written in the notes.
    Answer,
    Improve,
    Grammar,
    /// Continue the text with more detail.
    Expand,
    Custom(String),
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Full => "full",
            Mode::Explain => "explain",
            Mode::Answer => "answer",
            Mode::Improve => "improve",
            Mode::Grammar => "grammar",
            Mode::Expand => "expand",
            Mode::Custom(name) => name,
        }
    }

    /// `explain` is answered with highlights, everything else with an edit.
    pub fn is_explain(&self) -> bool {
        matches!(self, Mode::Explain)
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "full" => Mode::Full,
            "explain" => Mode::Explain,
            "answer" => Mode::Answer,
            "improve" => Mode::Improve,
            "grammar" => Mode::Grammar,
            "expand" => Mode::Expand,
            _ => Mode::Custom(normalized),
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::from(value.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}
