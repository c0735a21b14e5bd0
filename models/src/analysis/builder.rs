use crate::error::model_error::ModelError;
use crate::{AnalysisRequest, Mode};

use common::ErrorLocation;

use std::panic::Location;

/// Builder for validated [`AnalysisRequest`]s.
#[derive(Debug, Default)]
pub struct AnalysisRequestBuilder {
    text: Option<String>,
    mode: Option<Mode>,
}

impl AnalysisRequestBuilder {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<Mode>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Build the request. Mode defaults to [`Mode::Full`]; `explain` needs non-blank text.
    #[track_caller]
    pub fn build(self) -> Result<AnalysisRequest, ModelError> {
        let text = self.text.ok_or_else(|| ModelError::Validation {
            message: String::from("Text is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mode = self.mode.unwrap_or_default();

        if mode.is_explain() && text.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Explain needs non-blank text"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(AnalysisRequest { text, mode })
    }
}
