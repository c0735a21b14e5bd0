//! Test helpers for relay integration tests.
//!
//! - A wiremock provider standing in for Groq
//! - A real relay server on an OS-assigned port pointed at it
//! - Completion envelopes in the provider's wire shape

use relay_core::config::{PromptBook, ServerConfig, UpstreamConfig};
use relay_core::llm_client::LlmClient;
use relay_core::relay::Relay;
use relay_core::server::{RelayServerHandle, start_relay_server};

use common::RedactedApiKey;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "gsk-test-key-12345";
pub const UPSTREAM_PATH: &str = "/openai/v1/chat/completions";

/// Running relay plus the mock provider behind it.
///
/// Keep the whole struct alive for the duration of the test; dropping it
/// removes the static directory and stops the mock.
pub struct TestRelay {
    pub handle: RelayServerHandle,
    pub upstream: MockServer,
    pub static_dir: TempDir,
}

impl TestRelay {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.handle.base_url(), path)
    }
}

pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..UpstreamConfig::default()
    }
}

pub fn test_client(base_url: &str, key: &str) -> LlmClient {
    LlmClient::new(&upstream_config(base_url), RedactedApiKey::new(key))
        .expect("Failed to build LLM client")
}

/// Start a mock provider and a relay on port 0 in front of it.
pub async fn start_test_relay() -> TestRelay {
    let upstream = MockServer::start().await;
    let static_dir = TempDir::new().expect("Failed to create static dir");
    std::fs::write(
        static_dir.path().join("index.html"),
        "<html><body><div id=\"editor\" contenteditable></div></body></html>",
    )
    .expect("Failed to write index.html");

    let relay = Relay::new(
        test_client(&format!("{}/openai/v1", upstream.uri()), TEST_API_KEY),
        PromptBook::default(),
    );

    let server_config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
        static_dir: static_dir.path().display().to_string(),
    };

    let handle = start_relay_server(&server_config, relay)
        .await
        .expect("Failed to start relay server");

    TestRelay {
        handle,
        upstream,
        static_dir,
    }
}

/// Provider response carrying `content` as the first choice.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

/// Port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    port
}
