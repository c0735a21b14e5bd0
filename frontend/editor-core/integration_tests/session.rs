use crate::helpers::{mount_analyze, session_for, start_mock_relay};

use editor_core::session::NO_EXPLANATION;
use editor_core::{EditorError, Key, KeyOutcome, SelectionRange, Status};
use models::Mode;

use serde_json::json;

/// **VALUE**: Verifies explain without a selection never calls the relay.
///
/// **WHY THIS MATTERS**: Explaining nothing wastes a provider call and shows an empty popup.
#[tokio::test]
async fn given_no_selection_when_explaining_then_select_text_status() {
    let relay = start_mock_relay().await;
    let mut session = session_for(&relay, "Mitochondria: the powerhouse of the cell");

    let status = session.analyze(Mode::Explain, None).await.unwrap();

    assert_eq!(status, Status::SelectSomeText);
    assert_eq!(status.message(), "Select some text first.");
    assert!(relay.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: Verifies explain fills the popup and maps highlights to document offsets.
///
/// **BUG THIS CATCHES**: Would catch highlights being drawn at selection-relative offsets
/// (on the wrong words) or an empty explanation showing as a blank popup entry.
#[tokio::test]
async fn given_selection_when_explaining_then_popup_entries_and_document_highlights() {
    // GIVEN: A relay explaining two terms, one without an explanation
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "Mitochondria: the powerhouse of the cell", "mode": "explain"}),
        200,
        json!({"highlights": [
            {"start": 0, "end": 12, "text": "Mitochondria", "explanation": "Organelle that makes ATP."},
            {"start": 18, "end": 28, "text": "powerhouse", "explanation": ""}
        ]}),
    )
    .await;
    let mut session = session_for(&relay, "Bio: Mitochondria: the powerhouse of the cell");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(5, 45).unwrap())
        .unwrap();

    // WHEN: Explaining the selection
    let status = session.analyze(Mode::Explain, Some(&selection)).await.unwrap();

    // THEN: Popup shows both entries; highlights point into the document
    assert_eq!(status, Status::Explained);
    let popup = session.popup();
    assert!(popup.visible);
    assert_eq!(popup.entries, vec!["Organelle that makes ATP.", NO_EXPLANATION]);
    assert_eq!(popup.highlights[0].start, 5);
    assert_eq!(popup.highlights[0].end, 17);
    assert_eq!(
        session.editor().document().slice(SelectionRange::new(5, 17).unwrap()).unwrap(),
        "Mitochondria"
    );

    session.close_explanation();
    assert!(!session.popup().visible);
}

/// **VALUE**: Verifies Ctrl+Enter (`full`) rewrites the whole document.
#[tokio::test]
async fn given_full_mode_when_analyzing_then_document_replaced() {
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "cell notes", "mode": "full"}),
        200,
        json!({"updatedText": "Cell notes:\n- membrane", "feedback": "Structured"}),
    )
    .await;
    let mut session = session_for(&relay, "  cell notes\u{00A0}");

    let status = session.analyze(Mode::Full, None).await.unwrap();

    assert_eq!(status, Status::UpdatedDocument);
    assert_eq!(status.to_string(), "AI updated the document.");
    assert_eq!(session.editor().document().text(), "Cell notes:\n- membrane");
    assert_eq!(session.last_feedback(), Some("Structured"));
}

/// **VALUE**: Verifies a selection edit becomes a pending suggestion, resolved by Enter.
///
/// **WHY THIS MATTERS**: The user must get to review AI text before it replaces theirs.
#[tokio::test]
async fn given_selection_when_improving_then_suggestion_pending_until_enter() {
    // GIVEN: "teh" selected in the middle of a note
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "teh", "mode": "grammar"}),
        200,
        json!({"updatedText": "the", "feedback": "typo"}),
    )
    .await;
    let mut session = session_for(&relay, "read teh notes");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(5, 8).unwrap())
        .unwrap();

    // WHEN: Fixing grammar on the selection
    let status = session.analyze(Mode::Grammar, Some(&selection)).await.unwrap();

    // THEN: Pending suggestion, committed text untouched, Enter commits it
    assert_eq!(status, Status::UpdatedSelection);
    assert_eq!(session.editor().document().text(), "read teh notes");
    assert_eq!(session.editor().visible_text(), "read the notes");
    assert_eq!(session.editor().active_listener_count(), 1);

    assert_eq!(session.handle_key(&Key::Enter).unwrap(), KeyOutcome::Accepted);
    assert_eq!(session.editor().document().text(), "read the notes");
    assert_eq!(session.editor().active_listener_count(), 0);
}

/// **VALUE**: Verifies expand appends only the continuation and keeps the suggestion open.
#[tokio::test]
async fn given_pending_suggestion_when_expanding_then_echo_stripped() {
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "ATP", "mode": "improve"}),
        200,
        json!({"updatedText": "ATP stores energy.", "feedback": ""}),
    )
    .await;
    mount_analyze(
        &relay,
        json!({"text": "ATP stores energy.", "mode": "expand"}),
        200,
        json!({"updatedText": "ATP stores energy. Cells spend it constantly.", "feedback": "Expanded"}),
    )
    .await;
    let mut session = session_for(&relay, "ATP");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(0, 3).unwrap())
        .unwrap();
    session.analyze(Mode::Improve, Some(&selection)).await.unwrap();

    let status = session.expand().await.unwrap();

    assert_eq!(status, Status::Expanded);
    let pending = session.editor().pending().expect("suggestion should stay pending");
    assert_eq!(pending.proposed(), "ATP stores energy. Cells spend it constantly.");

    session.handle_key(&Key::Escape).unwrap();
    assert_eq!(session.editor().document().text(), "ATP");
    assert_eq!(session.editor().active_listener_count(), 0);
}

/// **VALUE**: Verifies a relay failure leaves the document alone and sets the error status.
#[tokio::test]
async fn given_relay_error_when_analyzing_then_error_status_and_document_unchanged() {
    let relay = start_mock_relay().await;
    mount_analyze(&relay, json!({"mode": "improve"}), 500, json!({"error": "server error"})).await;
    let mut session = session_for(&relay, "foo");

    let status = session.analyze(Mode::Improve, None).await.unwrap();

    assert_eq!(status, Status::ErrorContactingServer);
    assert_eq!(status.message(), "Error contacting server.");
    assert_eq!(session.editor().document().text(), "foo");
}

/// **VALUE**: Verifies a capture from before an edit is refused.
///
/// **BUG THIS CATCHES**: Would catch the session trusting old offsets after the user typed.
#[tokio::test]
async fn given_stale_selection_when_analyzing_then_stale_selection_error() {
    let relay = start_mock_relay().await;
    let mut session = session_for(&relay, "alpha beta");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(6, 10).unwrap())
        .unwrap();
    session
        .editor_mut()
        .user_edit(SelectionRange::caret(0), "> ")
        .unwrap();

    let result = session.analyze(Mode::Improve, Some(&selection)).await;

    assert!(matches!(result, Err(EditorError::StaleSelection { .. })));
    assert!(relay.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_pending_suggestion_when_running_another_edit_then_resolve_first_status() {
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"mode": "improve"}),
        200,
        json!({"updatedText": "Better", "feedback": ""}),
    )
    .await;
    let mut session = session_for(&relay, "good");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(0, 4).unwrap())
        .unwrap();
    session.analyze(Mode::Improve, Some(&selection)).await.unwrap();

    let status = session.analyze(Mode::Full, None).await.unwrap();

    assert_eq!(status, Status::ResolveSuggestionFirst);
    assert!(session.editor().has_pending());
}

/// **VALUE**: Verifies explaining visible text after a pending suggestion sends the words the
/// user selected and highlights them in committed coordinates.
///
/// **BUG THIS CATCHES**: Would catch the selection being resolved against the committed text,
/// sending the wrong words or failing with an out-of-range error.
#[tokio::test]
async fn given_pending_suggestion_when_explaining_visible_text_after_it_then_selected_words_sent() {
    // GIVEN: "aaa" replaced by a longer pending proposal
    let relay = start_mock_relay().await;
    mount_analyze(
        &relay,
        json!({"text": "aaa", "mode": "improve"}),
        200,
        json!({"updatedText": "a much longer proposal", "feedback": ""}),
    )
    .await;
    mount_analyze(
        &relay,
        json!({"text": "bbb", "mode": "explain"}),
        200,
        json!({"highlights": [
            {"start": 0, "end": 3, "text": "bbb", "explanation": "Three letters."}
        ]}),
    )
    .await;
    let mut session = session_for(&relay, "aaa bbb");
    let selection = session
        .editor()
        .capture_selection(SelectionRange::new(0, 3).unwrap())
        .unwrap();
    session.analyze(Mode::Improve, Some(&selection)).await.unwrap();
    assert_eq!(session.editor().visible_text(), "a much longer proposal bbb");

    // WHEN: Explaining "bbb" as the user sees it
    let visible = session
        .editor()
        .capture_selection(SelectionRange::new(23, 26).unwrap())
        .unwrap();
    let status = session.analyze(Mode::Explain, Some(&visible)).await.unwrap();

    // THEN: The highlight lands on committed "bbb" and the suggestion is untouched
    assert_eq!(status, Status::Explained);
    assert_eq!(session.popup().highlights[0].start, 4);
    assert_eq!(session.popup().highlights[0].end, 7);
    assert!(session.editor().has_pending());
}
