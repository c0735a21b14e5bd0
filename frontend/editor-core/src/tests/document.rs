use crate::document::{Document, SelectionRange};
use crate::error::EditorError;

/// **VALUE**: Verifies selections are captured by character, not byte.
///
/// **WHY THIS MATTERS**: Notes routinely contain accents and symbols. Byte offsets would
/// split a multi-byte character and panic on slicing.
///
/// **BUG THIS CATCHES**: Would catch `String` byte indexing sneaking into range handling.
#[test]
fn given_multibyte_text_when_capturing_then_selection_uses_char_offsets() {
    // GIVEN: A document with non-ASCII characters before the selection
    let document = Document::new("Café → Mitochondria");

    // WHEN: Capturing chars 7..19
    let selection = document
        .capture_selection(SelectionRange::new(7, 19).unwrap())
        .unwrap();

    // THEN: The captured text is the word, at the current revision
    assert_eq!(selection.text(), "Mitochondria");
    assert_eq!(selection.revision(), document.revision());
}

#[test]
fn given_range_past_end_when_capturing_then_invalid_range() {
    let document = Document::new("short");

    let result = document.capture_selection(SelectionRange::new(2, 9).unwrap());

    assert!(matches!(result, Err(EditorError::InvalidRange { .. })));
}

#[test]
fn given_reversed_bounds_when_creating_range_then_invalid_range() {
    assert!(matches!(
        SelectionRange::new(5, 2),
        Err(EditorError::InvalidRange { .. })
    ));
}

/// **VALUE**: Verifies a capture is invalidated by any mutation.
///
/// **WHY THIS MATTERS**: An AI reply can arrive after the user typed. Applying it to the
/// old offsets would overwrite the wrong characters.
#[test]
fn given_mutation_after_capture_when_checking_then_stale_selection() {
    // GIVEN: A capture, then an edit
    let mut document = Document::new("alpha beta gamma");
    let selection = document
        .capture_selection(SelectionRange::new(6, 10).unwrap())
        .unwrap();
    document
        .replace_range(SelectionRange::caret(0), "new ")
        .unwrap();

    // WHEN: Checking the capture
    let result = document.ensure_current(&selection);

    // THEN: It is stale
    assert!(matches!(
        result,
        Err(EditorError::StaleSelection {
            captured: 0,
            current: 1,
            ..
        })
    ));
}

#[test]
fn given_nbsp_and_padding_when_plain_text_then_normalized() {
    let document = Document::new("  term:\u{00A0}definition \n");

    assert_eq!(document.plain_text(), "term: definition");
}

#[test]
fn given_whitespace_selection_when_captured_then_blank() {
    let document = Document::new("a   b");

    let selection = document
        .capture_selection(SelectionRange::new(1, 4).unwrap())
        .unwrap();

    assert!(selection.is_blank());
}
