//! Recovering a JSON payload from free-form model output.
//!
//! Three branches, tried in order:
//! 1. [`parse_delimited`]: the first `<json>…</json>` block
//! 2. [`parse_whole`]: the entire reply
//! 3. [`fallback`]: a payload built from the original text
//!
//! A candidate only counts if it decodes into the shape the mode expects, so an
//! edit-shaped reply to `explain` falls through like any other garbage.

use models::{AnalysisResponse, EditResult, ExplainResult, Highlight, Mode, char_len};

use std::sync::OnceLock;

use regex::Regex;

const JSON_BLOCK_PATTERN: &str = r"(?s)<json>(.*?)</json>";
const CODE_FENCE: &str = "```";

pub const PARSE_FAILURE_FEEDBACK: &str = "Unable to parse AI response properly";
pub const PARSE_FAILURE_EXPLANATION_PREFIX: &str = "Parsing failed: ";

static JSON_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

fn json_block_regex() -> &'static Regex {
    JSON_BLOCK_REGEX.get_or_init(|| Regex::new(JSON_BLOCK_PATTERN).expect("valid regex pattern"))
}

/// The recovered payload, tagged with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Delimited(AnalysisResponse),
    WholeText(AnalysisResponse),
    Fallback {
        response: AnalysisResponse,
        raw: String,
    },
}

impl Extraction {
    pub fn response(&self) -> &AnalysisResponse {
        match self {
            Extraction::Delimited(response) | Extraction::WholeText(response) => response,
            Extraction::Fallback { response, .. } => response,
        }
    }

    pub fn into_response(self) -> AnalysisResponse {
        match self {
            Extraction::Delimited(response) | Extraction::WholeText(response) => response,
            Extraction::Fallback { response, .. } => response,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::Fallback { .. })
    }

    pub fn branch(&self) -> &'static str {
        match self {
            Extraction::Delimited(_) => "delimited",
            Extraction::WholeText(_) => "whole-text",
            Extraction::Fallback { .. } => "fallback",
        }
    }
}

/// Run all three branches against `raw`, the model reply for `text` in `mode`.
pub fn extract(mode: &Mode, text: &str, raw: &str) -> Extraction {
    if let Some(response) = parse_delimited(mode, text, raw) {
        return Extraction::Delimited(response);
    }

    if let Some(response) = parse_whole(mode, text, raw) {
        return Extraction::WholeText(response);
    }

    Extraction::Fallback {
        response: fallback(mode, text, raw),
        raw: raw.to_string(),
    }
}

/// Contents of the first `<json>…</json>` block, trimmed.
pub fn delimited_block(raw: &str) -> Option<&str> {
    json_block_regex()
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|block| block.as_str().trim())
}

pub fn parse_delimited(mode: &Mode, text: &str, raw: &str) -> Option<AnalysisResponse> {
    delimited_block(raw).and_then(|block| parse_payload(mode, text, block))
}

pub fn parse_whole(mode: &Mode, text: &str, raw: &str) -> Option<AnalysisResponse> {
    parse_payload(mode, text, raw)
}

/// Decode `candidate` into the shape `mode` expects.
///
/// Highlight offsets are clamped to the length of `text`, and a highlight with no
/// `text` gets the covered slice of `text`.
pub fn parse_payload(mode: &Mode, text: &str, candidate: &str) -> Option<AnalysisResponse> {
    let candidate = strip_code_fence(candidate.trim());

    if mode.is_explain() {
        let explain: ExplainResult = serde_json::from_str(candidate).ok()?;
        let len = char_len(text);
        let highlights = explain
            .highlights
            .into_iter()
            .map(|highlight| highlight.clamped(len).with_text_from(text))
            .collect();
        return Some(AnalysisResponse::explain(highlights));
    }

    let edit: EditResult = serde_json::from_str(candidate).ok()?;
    Some(AnalysisResponse::Edit(edit))
}

/// Safe payload when nothing parsed.
///
/// Edit modes keep the original text. Explain returns one highlight over the whole
/// input carrying the raw reply, so the popup still has something to show.
pub fn fallback(mode: &Mode, text: &str, raw: &str) -> AnalysisResponse {
    if mode.is_explain() {
        let explanation = format!("{}{}", PARSE_FAILURE_EXPLANATION_PREFIX, raw);
        return AnalysisResponse::explain(vec![Highlight::covering(text, explanation)]);
    }

    AnalysisResponse::edit(text, PARSE_FAILURE_FEEDBACK)
}

/// Drop a surrounding Markdown code fence (```json … ```), if any.
pub fn strip_code_fence(candidate: &str) -> &str {
    let Some(rest) = candidate.strip_prefix(CODE_FENCE) else {
        return candidate;
    };

    // Skip the info string (e.g. `json`) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix(CODE_FENCE)
        .unwrap_or(body)
        .trim()
}
