use crate::helpers::{TEST_API_KEY, UPSTREAM_PATH, completion_body, test_client};

use relay_core::error::LlmClientError;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the first choice's content is returned verbatim.
#[tokio::test]
async fn given_completion_when_complete_then_returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("<json>{}</json>")))
        .mount(&server)
        .await;
    let client = test_client(&format!("{}/openai/v1", server.uri()), TEST_API_KEY);

    let content = client.complete("prompt").await.expect("Completion failed");

    assert_eq!(content, "<json>{}</json>");
}

/// **VALUE**: Verifies an envelope without choices or content is an empty reply, not an error.
///
/// **WHY THIS MATTERS**: An empty reply must go through the parse fallback so the user
/// keeps their text instead of seeing "Error contacting server."
#[tokio::test]
async fn given_empty_choices_when_complete_then_returns_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"role": "assistant", "content": null}}]})),
        )
        .mount(&server)
        .await;
    let client = test_client(&format!("{}/openai/v1", server.uri()), TEST_API_KEY);

    assert_eq!(client.complete("prompt").await.expect("No choices"), "");
    assert_eq!(client.complete("prompt").await.expect("Null content"), "");
}

/// **VALUE**: Verifies non-2xx responses keep their status code.
///
/// **BUG THIS CATCHES**: Would catch auth failures being indistinguishable from outages
/// in the log.
#[tokio::test]
async fn given_403_when_complete_then_upstream_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    let client = test_client(&format!("{}/openai/v1", server.uri()), TEST_API_KEY);

    let err = client.complete("prompt").await.unwrap_err();

    match &err {
        LlmClientError::Upstream { status_code, message, .. } => {
            assert_eq!(status_code.0, 403);
            assert!(status_code.is_auth_failure());
            assert_eq!(message, "forbidden");
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn given_non_envelope_body_when_complete_then_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;
    let client = test_client(&format!("{}/openai/v1", server.uri()), TEST_API_KEY);

    let err = client.complete("prompt").await.unwrap_err();

    assert!(matches!(err, LlmClientError::Json { .. }));
}

/// **VALUE**: Verifies no Authorization header is sent when no key is configured.
///
/// **BUG THIS CATCHES**: Would catch a literal `Bearer ` header going to local
/// OpenAI-compatible servers that reject malformed credentials.
#[tokio::test]
async fn given_empty_key_when_complete_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;
    let client = test_client(&format!("{}/openai/v1", server.uri()), "");

    client.complete("prompt").await.expect("Completion failed");

    let requests = server.received_requests().await.expect("Recording disabled");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}
