//! `/analyze` request and response bodies.

pub mod builder;

use crate::Mode;

use serde::{Deserialize, Serialize};

/// Offsets in this crate count Unicode scalar values, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// One user action: the text to work on and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    #[serde(default)]
    pub mode: Mode,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}

/// Rewritten text plus a short note about what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    pub updated_text: String,
    #[serde(default)]
    pub feedback: String,
}

/// A highlighted span of the analysed text with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    /// Models sometimes omit it; [`Highlight::with_text_from`] fills it back in.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub explanation: String,
}

impl Highlight {
    /// A highlight spanning all of `text`.
    pub fn covering(text: &str, explanation: impl Into<String>) -> Self {
        Self {
            start: 0,
            end: char_len(text),
            text: text.to_string(),
            explanation: explanation.into(),
        }
    }

    /// Pull model-supplied offsets back inside `[0, len]` with `start <= end`.
    pub fn clamped(mut self, len: usize) -> Self {
        self.end = self.end.min(len);
        self.start = self.start.min(self.end);
        self
    }

    /// Fill a missing `text` from `source[start..end]`. Offsets must already be clamped.
    pub fn with_text_from(mut self, source: &str) -> Self {
        if self.text.is_empty() {
            self.text = source
                .chars()
                .skip(self.start)
                .take(self.end - self.start)
                .collect();
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResult {
    pub highlights: Vec<Highlight>,
}

/// Body of a successful `/analyze` reply.
///
/// Untagged on the wire: the client tells the two apart by their fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Edit(EditResult),
    Explain(ExplainResult),
}

impl AnalysisResponse {
    pub fn edit(updated_text: impl Into<String>, feedback: impl Into<String>) -> Self {
        AnalysisResponse::Edit(EditResult {
            updated_text: updated_text.into(),
            feedback: feedback.into(),
        })
    }

    pub fn explain(highlights: Vec<Highlight>) -> Self {
        AnalysisResponse::Explain(ExplainResult { highlights })
    }

    pub fn as_edit(&self) -> Option<&EditResult> {
        match self {
            AnalysisResponse::Edit(edit) => Some(edit),
            AnalysisResponse::Explain(_) => None,
        }
    }

    pub fn as_explain(&self) -> Option<&ExplainResult> {
        match self {
            AnalysisResponse::Explain(explain) => Some(explain),
            AnalysisResponse::Edit(_) => None,
        }
    }
}

/// Body of a failed `/analyze` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
