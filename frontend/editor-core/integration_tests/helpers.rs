//! Test helpers for editor integration tests: a wiremock relay and sessions pointed at it.

use editor_core::{Editor, EditorSession, RelayClient};

use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn start_mock_relay() -> MockServer {
    MockServer::start().await
}

pub fn session_for(relay: &MockServer, text: &str) -> EditorSession {
    let client = RelayClient::new(&relay.uri()).expect("Failed to build relay client");
    EditorSession::new(Editor::new(text), client)
}

/// Answer `POST /analyze` bodies matching `request` with `response`.
pub async fn mount_analyze(relay: &MockServer, request: Value, status: u16, response: Value) {
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_partial_json(request))
        .respond_with(ResponseTemplate::new(status).set_body_json(response))
        .expect(1)
        .mount(relay)
        .await;
}
