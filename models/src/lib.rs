//! Data shapes exchanged between the editor and the relay.
//!
//! Pure data: no I/O, no prompt logic. The relay (`relay-core`) produces these,
//! the editor (`editor-core`) consumes them, and both agree on the JSON below.
//!
//! ```text
//! POST /analyze   {"text": "...", "mode": "improve"}
//! 200             {"updatedText": "...", "feedback": "..."}
//! 200             {"highlights": [{"start": 0, "end": 12, "text": "...", "explanation": "..."}]}
//! 500             {"error": "server error"}
//! ```

pub mod analysis;
pub mod error;
pub mod mode;

#[cfg(test)]
mod tests;

pub use analysis::builder::AnalysisRequestBuilder;
pub use analysis::{
    AnalysisRequest, AnalysisResponse, EditResult, ErrorBody, ExplainResult, Highlight,
    char_len,
};
pub use error::model_error::ModelError;
pub use mode::Mode;
