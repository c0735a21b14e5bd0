use crate::ANALYZE_ENDPOINT;
use crate::error::RelayClientError;

use common::{ErrorLocation, HttpStatusCode};
use models::{AnalysisRequest, AnalysisResponse, ErrorBody};

use std::panic::Location;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(90);

pub const RAW_TEXT_FEEDBACK: &str = "AI returned raw text.";

/// HTTP client for the relay's `POST /analyze`.
#[derive(Clone)]
pub struct RelayClient {
    endpoint: Url,
    client: Client,
}

impl RelayClient {
    /// `base_url` is the origin the editor was served from, e.g. `http://127.0.0.1:3000/`.
    pub fn new(base_url: &str) -> Result<Self, RelayClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(ANALYZE_ENDPOINT)?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one request and decode the reply.
    ///
    /// A reply that is a JSON *string* is parsed again; if that fails it becomes
    /// an edit result carrying the submitted text unchanged.
    ///
    /// # Errors
    ///
    /// - [`RelayClientError::Http`] on connection failure or timeout
    /// - [`RelayClientError::Server`] on a non-2xx status
    /// - [`RelayClientError::Json`] if the body is neither response shape
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, RelayClientError> {
        debug!(
            "POST {} mode={} text_len={}",
            self.endpoint,
            request.mode,
            request.text.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|error| error.error)
                .unwrap_or(body);
            return Err(RelayClientError::Server {
                status_code: HttpStatusCode::from(status.as_u16()),
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: Value = response.json().await?;
        decode_response(body, &request.text)
    }
}

/// Turn a relay body into a response, re-parsing double-encoded JSON.
pub fn decode_response(body: Value, sent_text: &str) -> Result<AnalysisResponse, RelayClientError> {
    match body {
        Value::String(raw) => match serde_json::from_str::<AnalysisResponse>(&raw) {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!("Relay returned an unparseable string body: {}", e);
                Ok(AnalysisResponse::edit(sent_text, RAW_TEXT_FEEDBACK))
            }
        },
        other => Ok(serde_json::from_value(other)?),
    }
}
