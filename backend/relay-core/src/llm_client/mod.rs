//! Client for OpenAI-compatible chat completion APIs (Groq by default).

use crate::config::UpstreamConfig;
use crate::error::llm_client::LlmClientError;

use common::{ErrorLocation, HttpStatusCode, RedactedApiKey};

use std::panic::Location;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";
const SYSTEM_ROLE: &str = "system";
const USER_ROLE: &str = "user";

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: SYSTEM_ROLE.to_string(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: USER_ROLE.to_string(),
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

/// One configured provider endpoint. Cheap to clone; the inner `reqwest::Client` is shared.
#[derive(Clone)]
pub struct LlmClient {
    endpoint: Url,
    client: Client,
    api_key: RedactedApiKey,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
}

impl LlmClient {
    /// Build a client from the `upstream` config section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmClientError::UrlParse`] for an unparseable base URL and
    /// [`LlmClientError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &UpstreamConfig, api_key: RedactedApiKey) -> Result<Self, LlmClientError> {
        let endpoint = completions_endpoint(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint,
            client,
            api_key,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the system message plus `prompt` and return the first choice's text.
    ///
    /// A reply with no choices or no content yields an empty string; deciding what
    /// that means is the caller's job.
    ///
    /// # Errors
    ///
    /// - [`LlmClientError::Http`] on connection failure or timeout
    /// - [`LlmClientError::Upstream`] on a non-2xx status
    /// - [`LlmClientError::Json`] if the body is not a completion envelope
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(prompt),
            ],
            temperature: self.temperature,
        };

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header(reqwest::header::AUTHORIZATION, self.api_key.bearer());
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmClientError::Upstream {
                status_code: HttpStatusCode::from(status.as_u16()),
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        debug!("Upstream returned {} chars from {}", content.len(), self.model);
        Ok(content)
    }
}

/// `{base}/chat/completions`, unless `base` already points at the endpoint.
pub fn completions_endpoint(base_url: &str) -> Result<Url, LlmClientError> {
    let mut base = Url::parse(base_url)?;

    if base.path().trim_end_matches('/').ends_with(CHAT_COMPLETIONS_ENDPOINT) {
        return Ok(base);
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base.join(CHAT_COMPLETIONS_ENDPOINT)?)
}
