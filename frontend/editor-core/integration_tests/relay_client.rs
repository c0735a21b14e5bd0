use crate::helpers::{mount_analyze, start_mock_relay};

use editor_core::{RelayClient, RelayClientError};
use models::{AnalysisRequest, AnalysisResponse, Mode};

use serde_json::json;

/// **VALUE**: Verifies the client posts `{text, mode}` and decodes an edit reply.
#[tokio::test]
async fn given_relay_when_analyzing_then_edit_response_decoded() {
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "teh notes", "mode": "grammar"}),
        200,
        json!({"updatedText": "the notes", "feedback": "Fixed typo"}),
    )
    .await;
    let client = RelayClient::new(&relay.uri()).unwrap();

    let response = client
        .analyze(&AnalysisRequest::new("teh notes", Mode::Grammar))
        .await
        .unwrap();

    assert_eq!(response, AnalysisResponse::edit("the notes", "Fixed typo"));
}

/// **VALUE**: Verifies a relay 500 surfaces its `{error}` message and status.
#[tokio::test]
async fn given_relay_500_when_analyzing_then_server_error_with_message() {
    let relay = start_mock_relay().await;
    mount_analyze(&relay, json!({"mode": "improve"}), 500, json!({"error": "server error"})).await;
    let client = RelayClient::new(&relay.uri()).unwrap();

    let err = client
        .analyze(&AnalysisRequest::new("foo", Mode::Improve))
        .await
        .unwrap_err();

    match err {
        RelayClientError::Server {
            status_code,
            message,
            ..
        } => {
            assert_eq!(status_code.0, 500);
            assert_eq!(message, "server error");
        }
        other => panic!("Expected Server error, got {:?}", other),
    }
}
