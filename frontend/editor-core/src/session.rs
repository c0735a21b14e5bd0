//! Context-menu actions: send text to the relay and apply what comes back.
//!
//! Relay failures never surface as errors here. They end in
//! [`Status::ErrorContactingServer`] and the document is left as it was.
//! Only editor misuse (stale selection, no pending suggestion) is an `Err`.

use crate::document::CapturedSelection;
use crate::editor::{Editor, Key, KeyOutcome};
use crate::error::{EditorError, RelayClientError};
use crate::relay_client::RelayClient;

use common::ErrorLocation;
use models::{AnalysisRequestBuilder, AnalysisResponse, Highlight, Mode};

use std::fmt::{Display, Formatter};
use std::panic::Location;

use log::{error, info};

pub const NO_EXPLANATION: &str = "No explanation.";

/// Feedback line under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    SelectSomeText,
    Analyzing,
    UpdatedSelection,
    UpdatedDocument,
    Explained,
    Expanded,
    NothingToExpand,
    ResolveSuggestionFirst,
    ErrorContactingServer,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Idle => "",
            Status::SelectSomeText => "Select some text first.",
            Status::Analyzing => "Analyzing...",
            Status::UpdatedSelection => "AI updated selected text.",
            Status::UpdatedDocument => "AI updated the document.",
            Status::Explained => "Explanations ready.",
            Status::Expanded => "AI expanded the suggestion.",
            Status::NothingToExpand => "AI had nothing to add.",
            Status::ResolveSuggestionFirst => "Accept or reject the current suggestion first.",
            Status::ErrorContactingServer => "Error contacting server.",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Explanation popup contents. Highlight offsets are document offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplanationPopup {
    pub visible: bool,
    pub entries: Vec<String>,
    pub highlights: Vec<Highlight>,
}

impl ExplanationPopup {
    fn show(highlights: Vec<Highlight>) -> Self {
        let entries = highlights
            .iter()
            .map(|highlight| match highlight.explanation.trim() {
                "" => NO_EXPLANATION.to_string(),
                explanation => explanation.to_string(),
            })
            .collect();

        Self {
            visible: true,
            entries,
            highlights,
        }
    }
}

/// Where an edit result goes.
enum EditTarget<'a> {
    Selection(&'a CapturedSelection),
    Document,
}

/// An [`Editor`] wired to a relay.
pub struct EditorSession {
    editor: Editor,
    client: RelayClient,
    status: Status,
    popup: ExplanationPopup,
    last_feedback: Option<String>,
}

impl EditorSession {
    pub fn new(editor: Editor, client: RelayClient) -> Self {
        Self {
            editor,
            client,
            status: Status::Idle,
            popup: ExplanationPopup::default(),
            last_feedback: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn popup(&self) -> &ExplanationPopup {
        &self.popup
    }

    /// Feedback string from the last edit result, if any.
    pub fn last_feedback(&self) -> Option<&str> {
        self.last_feedback.as_deref()
    }

    pub fn close_explanation(&mut self) {
        self.popup.visible = false;
    }

    pub fn handle_key(&mut self, key: &Key) -> Result<KeyOutcome, EditorError> {
        self.editor.handle_key(key)
    }

    /// Run one context-menu action.
    ///
    /// - `explain` needs a non-blank selection and fills the popup.
    /// - `full` always rewrites the whole document.
    /// - Other modes propose a suggestion over a non-blank selection, or
    ///   rewrite the whole document when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::StaleSelection`] if `selection` predates the
    /// current document revision.
    pub async fn analyze(
        &mut self,
        mode: Mode,
        selection: Option<&CapturedSelection>,
    ) -> Result<Status, EditorError> {
        let selection = selection.filter(|selected| !selected.is_blank());

        if mode.is_explain() {
            let Some(selected) = selection else {
                return Ok(self.set_status(Status::SelectSomeText));
            };
            self.editor.document().ensure_current(selected)?;
            return self.explain(mode, selected).await;
        }

        if self.editor.has_pending() {
            return Ok(self.set_status(Status::ResolveSuggestionFirst));
        }

        let (target, text) = match selection {
            Some(selected) if mode != Mode::Full => {
                self.editor.document().ensure_current(selected)?;
                (EditTarget::Selection(selected), selected.text().to_string())
            }
            _ => (EditTarget::Document, self.editor.document().plain_text()),
        };

        self.edit(mode, target, text).await
    }

    /// Ask the relay to continue the pending suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoPendingSuggestion`] if nothing is pending.
    pub async fn expand(&mut self) -> Result<Status, EditorError> {
        let current = self
            .editor
            .pending()
            .map(|suggestion| suggestion.proposed().to_string())
            .ok_or_else(|| EditorError::NoPendingSuggestion {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let request = AnalysisRequestBuilder::default()
            .with_text(current)
            .with_mode(Mode::Expand)
            .build()?;

        self.set_status(Status::Analyzing);
        let response = match self.client.analyze(&request).await {
            Ok(response) => response,
            Err(e) => return Ok(self.contact_failed(&e)),
        };

        let reply = match &response {
            AnalysisResponse::Edit(edit) => edit.updated_text.as_str(),
            AnalysisResponse::Explain(_) => "",
        };

        let status = if self.editor.apply_expansion(reply)? {
            Status::Expanded
        } else {
            Status::NothingToExpand
        };
        Ok(self.set_status(status))
    }

    async fn explain(
        &mut self,
        mode: Mode,
        selected: &CapturedSelection,
    ) -> Result<Status, EditorError> {
        let request = AnalysisRequestBuilder::default()
            .with_text(selected.text())
            .with_mode(mode)
            .build()?;

        self.set_status(Status::Analyzing);
        let response = match self.client.analyze(&request).await {
            Ok(response) => response,
            Err(e) => return Ok(self.contact_failed(&e)),
        };

        let offset = selected.range().start();
        let span = selected.range().len();
        let highlights = match response {
            AnalysisResponse::Explain(explain) => explain
                .highlights
                .into_iter()
                .map(|highlight| {
                    let mut highlight = highlight.clamped(span);
                    highlight.start += offset;
                    highlight.end += offset;
                    highlight
                })
                .collect(),
            AnalysisResponse::Edit(_) => Vec::new(),
        };

        info!("Explain returned {} highlights", highlights.len());
        self.popup = ExplanationPopup::show(highlights);
        Ok(self.set_status(Status::Explained))
    }

    async fn edit(
        &mut self,
        mode: Mode,
        target: EditTarget<'_>,
        text: String,
    ) -> Result<Status, EditorError> {
        let request = AnalysisRequestBuilder::default()
            .with_text(text)
            .with_mode(mode)
            .build()?;

        self.set_status(Status::Analyzing);
        let response = match self.client.analyze(&request).await {
            Ok(response) => response,
            Err(e) => return Ok(self.contact_failed(&e)),
        };

        let (updated, feedback) = match response {
            AnalysisResponse::Edit(edit) if !edit.updated_text.is_empty() => {
                (edit.updated_text, edit.feedback)
            }
            AnalysisResponse::Edit(edit) => (request.text.clone(), edit.feedback),
            AnalysisResponse::Explain(_) => (request.text.clone(), String::new()),
        };
        self.last_feedback = Some(feedback);

        let status = match target {
            EditTarget::Selection(selected) => {
                self.editor.insert_suggestion(selected, updated)?;
                Status::UpdatedSelection
            }
            EditTarget::Document => {
                self.editor.replace_document(updated)?;
                Status::UpdatedDocument
            }
        };
        Ok(self.set_status(status))
    }

    fn contact_failed(&mut self, e: &RelayClientError) -> Status {
        error!("Error contacting relay: {}", e);
        self.set_status(Status::ErrorContactingServer)
    }

    fn set_status(&mut self, status: Status) -> Status {
        self.status = status;
        status
    }
}
