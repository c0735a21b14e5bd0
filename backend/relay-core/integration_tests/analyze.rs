use crate::helpers::{TEST_API_KEY, UPSTREAM_PATH, closed_port, completion_body, start_test_relay, test_client};

use relay_core::config::{PromptBook, ServerConfig};
use relay_core::relay::Relay;
use relay_core::server::start_relay_server;

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies the explain flow end to end for a term/definition line.
///
/// **WHY THIS MATTERS**: This is the hover-popup feature. The browser only ever sees
/// `{highlights: [...]}`; if the delimited block is not extracted the popup shows nothing.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The `<json>` block is not located inside chatty model output
/// - Highlights are returned under a different key
/// - The prompt never reaches the provider with the user's text
#[tokio::test]
async fn given_explain_request_when_model_returns_delimited_json_then_highlights_returned() {
    // GIVEN: Provider replies with prose around a delimited highlight block
    let relay = start_test_relay().await;
    let reply = "Here you go:\n<json>{\"highlights\":[{\"start\":0,\"end\":12,\"text\":\"Mitochondria\",\"explanation\":\"Organelle that produces ATP.\"}]}</json>\nHope that helps!";
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(body_string_contains("Mitochondria: the powerhouse of the cell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
        .expect(1)
        .mount(&relay.upstream)
        .await;

    // WHEN: The editor posts an explain request
    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "Mitochondria: the powerhouse of the cell", "mode": "explain"}))
        .send()
        .await
        .expect("Request failed");

    // THEN: 200 with the highlight as the model described it
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    let highlights = body["highlights"].as_array().expect("highlights missing");
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0]["start"], 0);
    assert_eq!(highlights[0]["end"], 12);
    assert_eq!(highlights[0]["text"], "Mitochondria");
    assert_eq!(highlights[0]["explanation"], "Organelle that produces ATP.");
}

/// **VALUE**: Verifies prose-only model output still yields a usable edit result.
///
/// **WHY THIS MATTERS**: Models ignore formatting instructions often enough that a raw
/// reply must never blank the user's note. The fallback returns the submitted text.
///
/// **BUG THIS CATCHES**: Would catch the fallback returning the model's prose as
/// `updatedText`, or a 500 for a reply that simply was not JSON.
#[tokio::test]
async fn given_improve_request_when_model_returns_prose_then_fallback_keeps_original_text() {
    // GIVEN: Provider replies with no JSON at all
    let relay = start_test_relay().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Sure! I tidied that up for you.")),
        )
        .mount(&relay.upstream)
        .await;

    // WHEN: Improving "foo"
    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "foo", "mode": "improve"}))
        .send()
        .await
        .expect("Request failed");

    // THEN: 200 with the original text and the parse-failure feedback
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["updatedText"], "foo");
    assert_eq!(body["feedback"], "Unable to parse AI response properly");
}

/// **VALUE**: Verifies the provider call carries the bearer key, model and system message.
///
/// **BUG THIS CATCHES**: Would catch a missing Authorization header (every real request
/// would 401) or a dropped system message.
#[tokio::test]
async fn given_edit_request_when_relayed_then_provider_sees_key_model_and_system_prompt() {
    let relay = start_test_relay().await;
    let reply = "<json>{\"updatedText\":\"Their going home.\",\"feedback\":\"No change\"}</json>";
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_string_contains("llama-3.3-70b-versatile"))
        .and(body_string_contains("You are an AI assistant for note-taking."))
        .and(body_string_contains("Mode: grammar."))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
        .expect(1)
        .mount(&relay.upstream)
        .await;

    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "their going home", "mode": "grammar"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["updatedText"], "Their going home.");
}

/// **VALUE**: Verifies a missing mode is treated as `full`.
#[tokio::test]
async fn given_request_without_mode_when_relayed_then_full_mode_prompt_sent() {
    let relay = start_test_relay().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(body_string_contains("Mode: full."))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "{\"updatedText\":\"Notes\",\"feedback\":\"ok\"}",
        )))
        .expect(1)
        .mount(&relay.upstream)
        .await;

    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "notes"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["updatedText"], "Notes");
}

/// **VALUE**: Verifies a provider failure becomes a bare 500 with the fixed error body.
///
/// **WHY THIS MATTERS**: The editor shows "Error contacting server." on any non-2xx; the
/// provider's error text may contain the prompt and must not be forwarded.
#[tokio::test]
async fn given_upstream_500_when_analyzing_then_returns_500_server_error() {
    let relay = start_test_relay().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded: <prompt echo>"))
        .mount(&relay.upstream)
        .await;

    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "foo", "mode": "improve"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body, json!({"error": "server error"}));
}

/// **VALUE**: Verifies an invalid key (provider 401) is reported the same as any upstream failure.
#[tokio::test]
async fn given_upstream_401_when_analyzing_then_returns_500_server_error() {
    let relay = start_test_relay().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Invalid API Key"}})))
        .mount(&relay.upstream)
        .await;

    let response = reqwest::Client::new()
        .post(relay.url("/analyze"))
        .json(&json!({"text": "foo", "mode": "explain"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["error"], "server error");
}

/// **VALUE**: Verifies an unreachable provider yields 500, not a hung or crashed request.
///
/// **BUG THIS CATCHES**: Would catch a connection error escaping as a panic in the handler.
#[tokio::test]
async fn given_unreachable_upstream_when_analyzing_then_returns_500_server_error() {
    // GIVEN: A relay whose provider URL has nothing listening
    let port = closed_port().await;
    let relay = Relay::new(
        test_client(&format!("http://127.0.0.1:{}/openai/v1", port), TEST_API_KEY),
        PromptBook::default(),
    );
    let server_config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
        ..ServerConfig::default()
    };
    let handle = start_relay_server(&server_config, relay)
        .await
        .expect("Failed to start relay server");

    // WHEN: Analyzing
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", handle.base_url()))
        .json(&json!({"text": "foo", "mode": "improve"}))
        .send()
        .await
        .expect("Request failed");

    // THEN: 500 with the fixed body
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body, json!({"error": "server error"}));

    handle.shutdown().await.expect("Shutdown failed");
}

/// **VALUE**: Verifies malformed bodies are rejected with 400 before any provider call.
///
/// **BUG THIS CATCHES**: Would catch a body without `text` reaching the provider and
/// costing a request, or axum's default plain-text rejection leaking through.
#[tokio::test]
async fn given_malformed_body_when_analyzing_then_returns_400_without_upstream_call() {
    let relay = start_test_relay().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&relay.upstream)
        .await;

    let client = reqwest::Client::new();
    let missing_text = client
        .post(relay.url("/analyze"))
        .json(&json!({"mode": "improve"}))
        .send()
        .await
        .expect("Request failed");
    let not_json = client
        .post(relay.url("/analyze"))
        .header("content-type", "application/json")
        .body("{ text: foo")
        .send()
        .await
        .expect("Request failed");

    for response in [missing_text, not_json] {
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.expect("Body is not JSON");
        assert_eq!(body, json!({"error": "invalid request body"}));
    }
}

#[tokio::test]
async fn given_running_relay_when_health_checked_then_ok() {
    let relay = start_test_relay().await;

    let response = reqwest::get(relay.url("/health"))
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["status"], "ok");
}

/// **VALUE**: Verifies the editor page is served from the static directory.
///
/// **WHY THIS MATTERS**: The browser loads the editor from the same origin it posts to.
#[tokio::test]
async fn given_static_dir_when_root_requested_then_index_served() {
    let relay = start_test_relay().await;

    let response = reqwest::get(relay.url("/")).await.expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.expect("No body");
    assert!(body.contains("contenteditable"));
    assert!(relay.static_dir.path().join("index.html").exists());
}

/// **VALUE**: Verifies shutdown stops the listener.
///
/// **BUG THIS CATCHES**: Would catch the shutdown signal being dropped so the server keeps
/// the port after the process asked it to stop.
#[tokio::test]
async fn given_running_relay_when_shutdown_then_connections_refused() {
    let relay = start_test_relay().await;
    let health_url = relay.url("/health");

    relay.handle.shutdown().await.expect("Shutdown failed");

    let result = reqwest::get(health_url).await;
    assert!(result.is_err(), "Server should no longer accept connections");
}
