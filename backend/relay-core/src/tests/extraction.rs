// Unit tests for JSON recovery from model output
// Each branch is exercised on its own, then through extract()

use crate::relay::extraction::{
    Extraction, PARSE_FAILURE_FEEDBACK, delimited_block, extract, fallback, parse_delimited,
    parse_whole, strip_code_fence,
};

use models::{AnalysisResponse, Highlight, Mode};

// ============================================
// BRANCH 1: DELIMITED
// ============================================

/// **VALUE**: Verifies the delimited branch reads the payload between `<json>` tags and
/// ignores chatter around it.
///
/// **WHY THIS MATTERS**: Models routinely prepend "Sure! Here is your JSON:". The prompt
/// asks for tags precisely so this prose can be skipped.
///
/// **BUG THIS CATCHES**: Would catch a greedy or single-line regex that misses multi-line
/// payloads.
#[test]
fn given_tagged_reply_with_prose_when_parse_delimited_then_returns_payload() {
    // GIVEN: A reply with prose and a multi-line tagged payload
    let raw = "Sure! Here it is:\n<json>\n{\n  \"updatedText\": \"Cell: basic unit of life\",\n  \"feedback\": \"added definition\"\n}\n</json>\nHope that helps.";

    // WHEN: Parsing the delimited block
    let response = parse_delimited(&Mode::Improve, "Cell:", raw);

    // THEN: The edit payload is recovered
    assert_eq!(
        response,
        Some(AnalysisResponse::edit("Cell: basic unit of life", "added definition"))
    );
}

/// **VALUE**: Verifies only the first tagged block is used.
#[test]
fn given_two_tagged_blocks_when_delimited_block_then_returns_first() {
    let raw = "<json>{\"a\":1}</json> and <json>{\"b\":2}</json>";

    assert_eq!(delimited_block(raw), Some("{\"a\":1}"));
}

#[test]
fn given_no_tags_when_parse_delimited_then_none() {
    assert!(parse_delimited(&Mode::Full, "x", "{\"updatedText\":\"y\"}").is_none());
}

// ============================================
// BRANCH 2: WHOLE TEXT
// ============================================

/// **VALUE**: Verifies an untagged but valid JSON reply is accepted.
///
/// **WHY THIS MATTERS**: Some providers ignore the tag instruction and answer with bare JSON.
#[test]
fn given_bare_json_reply_when_parse_whole_then_returns_payload() {
    let raw = "  {\"updatedText\": \"fixed\", \"feedback\": \"grammar\"}  ";

    let response = parse_whole(&Mode::Grammar, "fxied", raw);

    assert_eq!(response, Some(AnalysisResponse::edit("fixed", "grammar")));
}

/// **VALUE**: Verifies a Markdown code fence around the JSON is tolerated.
///
/// **BUG THIS CATCHES**: Would catch ```json fences making an otherwise valid reply fall
/// back to the original text.
#[test]
fn given_fenced_json_when_parse_whole_then_fence_is_stripped() {
    let raw = "```json\n{\"updatedText\": \"fenced\"}\n```";

    let response = parse_whole(&Mode::Improve, "x", raw);

    assert_eq!(response, Some(AnalysisResponse::edit("fenced", "")));
}

#[test]
fn given_fence_without_language_when_stripped_then_body_remains() {
    assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    assert_eq!(strip_code_fence("{}"), "{}");
}

/// **VALUE**: Verifies a payload of the wrong shape for the mode is rejected.
///
/// **WHY THIS MATTERS**: An explain request answered with `{updatedText}` would otherwise
/// reach the popup with no highlights at all.
#[test]
fn given_edit_shape_for_explain_when_parse_whole_then_none() {
    let raw = "{\"updatedText\": \"nope\"}";

    assert!(parse_whole(&Mode::Explain, "term: def", raw).is_none());
}

// ============================================
// BRANCH 3: FALLBACK
// ============================================

/// **VALUE**: Verifies the documented edit-mode fallback payload.
///
/// **WHY THIS MATTERS**: This is the exact body clients receive for unparseable output;
/// the editor keeps the user's text when it sees it.
///
/// **BUG THIS CATCHES**: Would catch a changed feedback string or the fallback returning
/// an empty `updatedText`, which would wipe the document.
#[test]
fn given_improve_on_foo_when_fallback_then_keeps_original_text() {
    let response = fallback(&Mode::Improve, "foo", "I cannot do that");

    assert_eq!(
        response,
        AnalysisResponse::edit("foo", "Unable to parse AI response properly")
    );
}

/// **VALUE**: Verifies the explain fallback covers the whole input with one highlight.
#[test]
fn given_explain_when_fallback_then_single_highlight_spans_input() {
    let text = "Mitochondria: the powerhouse of the cell";

    let response = fallback(&Mode::Explain, text, "oops");

    let highlights = &response.as_explain().unwrap().highlights;
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].start, 0);
    assert_eq!(highlights[0].end, text.chars().count());
    assert_eq!(highlights[0].text, text);
    assert_eq!(highlights[0].explanation, "Parsing failed: oops");
}

// ============================================
// extract(): BRANCH ORDER
// ============================================

/// **VALUE**: Verifies a tagged block holding the prompt's own placeholder template ends
/// in the fallback instead of an error.
///
/// **WHY THIS MATTERS**: Models sometimes echo the `<json>` template verbatim. The relay
/// must still answer 200 with the user's text intact.
#[test]
fn given_echoed_template_when_extract_then_falls_to_fallback() {
    // GIVEN: The tagged block is the unfilled template
    let raw = "<json>{\"updatedText\": <full document text>}</json>";

    // WHEN: Extracting
    let extraction = extract(&Mode::Full, "original", raw);

    // THEN: Fallback carries the raw reply
    assert!(extraction.is_fallback());
    assert_eq!(extraction.branch(), "fallback");
    match extraction {
        Extraction::Fallback { response, raw: kept } => {
            assert_eq!(kept, raw);
            assert_eq!(response.as_edit().unwrap().updated_text, "original");
            assert_eq!(response.as_edit().unwrap().feedback, PARSE_FAILURE_FEEDBACK);
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[test]
fn given_bare_json_when_extract_then_whole_text_branch() {
    let extraction = extract(&Mode::Answer, "q?", "{\"updatedText\": \"q? a.\"}");

    assert_eq!(extraction.branch(), "whole-text");
    assert_eq!(extraction.response().as_edit().unwrap().updated_text, "q? a.");
}

/// **VALUE**: Verifies model offsets beyond the analysed text are clamped.
///
/// **BUG THIS CATCHES**: Would catch highlights with `end` past the text reaching the editor,
/// where slicing by them would panic.
#[test]
fn given_explain_with_overlong_offsets_when_extract_then_offsets_clamped() {
    let text = "DNA: genetic code";
    let raw = "<json>{\"highlights\":[{\"start\":0,\"end\":400,\"text\":\"DNA\",\"explanation\":\"molecule\"}]}</json>";

    let extraction = extract(&Mode::Explain, text, raw);

    assert_eq!(extraction.branch(), "delimited");
    let highlights = &extraction.response().as_explain().unwrap().highlights;
    assert_eq!(
        highlights[0],
        Highlight {
            start: 0,
            end: 17,
            text: String::from("DNA"),
            explanation: String::from("molecule"),
        }
    );
}

/// **VALUE**: Verifies a highlight without `text` keeps the reply instead of discarding it.
///
/// **WHY THIS MATTERS**: One sloppy highlight used to make the whole payload undecodable,
/// throwing away every explanation in favour of the raw-reply fallback.
///
/// **BUG THIS CATCHES**: Would catch `text` becoming required again, or the missing text
/// being filled from byte offsets instead of character offsets.
#[test]
fn given_highlight_without_text_when_extract_then_text_filled_from_offsets() {
    // GIVEN: Two highlights, the second missing its text
    let text = "Café: ATP synthase";
    let raw = "<json>{\"highlights\":[{\"start\":0,\"end\":4,\"text\":\"Café\",\"explanation\":\"coffee\"},{\"start\":6,\"end\":18,\"explanation\":\"enzyme\"}]}</json>";

    // WHEN: Extracting
    let extraction = extract(&Mode::Explain, text, raw);

    // THEN: Both highlights survive and the missing text is the covered slice
    assert_eq!(extraction.branch(), "delimited");
    let highlights = &extraction.response().as_explain().unwrap().highlights;
    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[1].text, "ATP synthase");
    assert_eq!(highlights[1].explanation, "enzyme");
}

/// **VALUE**: Verifies explain with garbage output always yields a non-empty highlight list.
#[test]
fn given_explain_with_garbage_when_extract_then_highlights_non_empty() {
    for raw in ["", "not json", "<json></json>", "{\"highlights\": 3}"] {
        let extraction = extract(&Mode::Explain, "term: meaning", raw);
        let highlights = &extraction.response().as_explain().unwrap().highlights;
        assert!(!highlights.is_empty(), "raw {:?} produced no highlights", raw);
        assert_eq!(highlights[0].end, 13);
    }
}
