//! Pure projection of editor state into drawable segments and HTML.
//!
//! Nothing here mutates the editor; the UI re-renders after every action.

use crate::document::{SelectionRange, byte_offset};
use crate::editor::Editor;

use models::Highlight;

use uuid::Uuid;

pub const SUGGESTION_CLASS: &str = "ai-suggestion";
pub const HIGHLIGHT_CLASS: &str = "ai-highlight";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// The pending proposal, drawn in place of the text it would replace.
    Suggestion { id: Uuid, proposed: String },
    Highlight { text: String, explanation: String },
}

/// Split the committed document into segments, overlaying the pending
/// suggestion and any explanation highlights (document offsets).
///
/// Highlights that overlap the suggestion anchor or an earlier highlight are
/// skipped; out-of-range offsets are clamped.
pub fn segments(editor: &Editor, highlights: &[Highlight]) -> Vec<Segment> {
    let document = editor.document();
    let text = document.text();
    let len = document.char_len();

    let mut overlays: Vec<(SelectionRange, Segment)> = Vec::new();

    if let Some(suggestion) = editor.pending() {
        overlays.push((
            suggestion.anchor(),
            Segment::Suggestion {
                id: suggestion.id(),
                proposed: suggestion.proposed().to_string(),
            },
        ));
    }

    let mut sorted: Vec<Highlight> = highlights
        .iter()
        .cloned()
        .map(|highlight| highlight.clamped(len))
        .filter(|highlight| highlight.start < highlight.end)
        .collect();
    sorted.sort_by_key(|highlight| highlight.start);

    for highlight in sorted {
        let Ok(range) = SelectionRange::new(highlight.start, highlight.end) else {
            continue;
        };
        if overlays.iter().any(|(taken, _)| taken.overlaps(&range)) {
            continue;
        }
        let covered = char_slice(text, range).to_string();
        overlays.push((
            range,
            Segment::Highlight {
                text: covered,
                explanation: highlight.explanation,
            },
        ));
    }

    // Zero-width suggestions sort before a highlight starting at the same offset.
    overlays.sort_by_key(|(range, _)| (range.start(), range.end()));

    let mut result = Vec::new();
    let mut cursor = 0;
    for (range, segment) in overlays {
        if range.start() > cursor {
            push_text(&mut result, char_slice_between(text, cursor, range.start()));
        }
        result.push(segment);
        cursor = cursor.max(range.end());
    }
    if cursor < len {
        push_text(&mut result, char_slice_between(text, cursor, len));
    }

    result
}

/// HTML for the editor surface. Text is escaped; newlines become `<br>`.
pub fn to_html(segments: &[Segment]) -> String {
    let mut html = String::new();

    for segment in segments {
        match segment {
            Segment::Text(text) => html.push_str(&escape_text(text)),
            Segment::Suggestion { id, proposed } => {
                html.push_str(&format!(
                    "<span class=\"{}\" data-suggestion-id=\"{}\">{}</span>",
                    SUGGESTION_CLASS,
                    id,
                    escape_text(proposed)
                ));
            }
            Segment::Highlight { text, explanation } => {
                html.push_str(&format!(
                    "<mark class=\"{}\" title=\"{}\">{}</mark>",
                    HIGHLIGHT_CLASS,
                    html_escape::encode_double_quoted_attribute(explanation),
                    escape_text(text)
                ));
            }
        }
    }

    html
}

/// Convenience for `to_html(&segments(editor, highlights))`.
pub fn render_html(editor: &Editor, highlights: &[Highlight]) -> String {
    to_html(&segments(editor, highlights))
}

fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br>")
}

fn push_text(result: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        result.push(Segment::Text(text.to_string()));
    }
}

fn char_slice(text: &str, range: SelectionRange) -> &str {
    char_slice_between(text, range.start(), range.end())
}

fn char_slice_between(text: &str, start: usize, end: usize) -> &str {
    &text[byte_offset(text, start)..byte_offset(text, end)]
}
