use crate::document::SelectionRange;
use crate::editor::Editor;
use crate::render::{Segment, render_html, segments};

use models::Highlight;

fn highlight(start: usize, end: usize, explanation: &str) -> Highlight {
    Highlight {
        start,
        end,
        text: String::new(),
        explanation: explanation.to_string(),
    }
}

/// **VALUE**: Verifies the pending proposal is drawn in place of its anchor.
///
/// **BUG THIS CATCHES**: Would catch the original text being drawn next to the proposal,
/// or the surrounding text being dropped.
#[test]
fn given_pending_suggestion_when_projecting_then_suggestion_replaces_anchor() {
    // GIVEN: A suggestion over "cat"
    let mut editor = Editor::new("a cat sat");
    let selection = editor
        .capture_selection(SelectionRange::new(2, 5).unwrap())
        .unwrap();
    let id = editor.insert_suggestion(&selection, "dog").unwrap();

    // WHEN: Projecting
    let projected = segments(&editor, &[]);

    // THEN: Text, suggestion, text
    assert_eq!(
        projected,
        vec![
            Segment::Text(String::from("a ")),
            Segment::Suggestion {
                id,
                proposed: String::from("dog")
            },
            Segment::Text(String::from(" sat")),
        ]
    );
}

#[test]
fn given_highlights_when_projecting_then_marks_use_document_text_and_overlaps_dropped() {
    let editor = Editor::new("Mitochondria: the powerhouse");

    let projected = segments(
        &editor,
        &[
            highlight(18, 99, "energy"),
            highlight(0, 12, "organelle"),
            highlight(5, 14, "overlaps the first"),
        ],
    );

    assert_eq!(
        projected,
        vec![
            Segment::Highlight {
                text: String::from("Mitochondria"),
                explanation: String::from("organelle")
            },
            Segment::Text(String::from(": the ")),
            Segment::Highlight {
                text: String::from("powerhouse"),
                explanation: String::from("energy")
            },
        ]
    );
}

/// **VALUE**: Verifies user text and model explanations are escaped in HTML.
///
/// **WHY THIS MATTERS**: Explanations come from a model and notes come from the user; both
/// end up in `innerHTML`.
#[test]
fn given_markup_in_text_and_explanation_when_rendering_then_escaped() {
    let editor = Editor::new("<b>x</b>\nnext");

    let html = render_html(&editor, &[highlight(3, 4, "say \"hi\" <script>")]);

    assert!(html.starts_with("&lt;b&gt;<mark class=\"ai-highlight\""));
    assert!(html.contains("title=\"say &quot;hi&quot; &lt;script&gt;\""));
    assert!(html.ends_with("&lt;/b&gt;<br>next"));
    assert!(!html.contains("<script>"));
}
