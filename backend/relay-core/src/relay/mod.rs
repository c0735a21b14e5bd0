//! Mode + text in, structured edit or explanation out.

pub mod extraction;
pub mod prompt;

pub use extraction::Extraction;
pub use prompt::build_prompt;

use crate::config::PromptBook;
use crate::error::relay::RelayError;
use crate::llm_client::LlmClient;

use models::AnalysisRequest;

use std::sync::Arc;

use log::{debug, warn};

/// Prompt construction, one upstream call, JSON recovery.
///
/// Holds no per-request state; clones share the HTTP client and prompt book.
#[derive(Clone)]
pub struct Relay {
    llm: LlmClient,
    prompts: Arc<PromptBook>,
}

impl Relay {
    pub fn new(llm: LlmClient, prompts: PromptBook) -> Self {
        Self {
            llm,
            prompts: Arc::new(prompts),
        }
    }

    pub fn prompts(&self) -> &PromptBook {
        &self.prompts
    }

    /// Analyze one request.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Upstream`] if the completion call fails. Unparseable
    /// model output is not an error; it comes back as [`Extraction::Fallback`].
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Extraction, RelayError> {
        let prompt = build_prompt(&self.prompts, &request.mode, &request.text);
        debug!(
            "Built {} prompt ({} chars) for {} chars of text",
            request.mode,
            prompt.len(),
            request.text.len()
        );

        let raw = self.llm.complete(&prompt).await?;
        let extraction = extraction::extract(&request.mode, &request.text, &raw);

        if extraction.is_fallback() {
            warn!("JSON parse error for mode {}, raw: {}", request.mode, raw);
        } else {
            debug!("Parsed {} reply via {} branch", request.mode, extraction.branch());
        }

        Ok(extraction)
    }
}
