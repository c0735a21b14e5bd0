use crate::document::{CapturedSelection, Document, SelectionRange};
use crate::error::EditorError;
use crate::suggestion::{KeyListeners, ListenerId, Suggestion};

use common::ErrorLocation;
use models::char_len;

use std::panic::Location;

use log::debug;
use uuid::Uuid;

/// Keys the editor cares about while a suggestion is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Accepted,
    Rejected,
    /// Not ours; the UI handles it normally.
    PassThrough,
}

#[derive(Debug)]
struct Pending {
    suggestion: Suggestion,
    listener: ListenerId,
}

/// Committed document plus at most one pending suggestion.
#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    pending: Option<Pending>,
    listeners: KeyListeners,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            document: Document::new(text),
            pending: None,
            listeners: KeyListeners::default(),
        }
    }

    /// The committed document, without any pending suggestion applied.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn pending(&self) -> Option<&Suggestion> {
        self.pending.as_ref().map(|pending| &pending.suggestion)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn active_listener_count(&self) -> usize {
        self.listeners.active_count()
    }

    /// What the user sees: the committed text with the pending proposal in place.
    pub fn visible_text(&self) -> String {
        let Some(pending) = &self.pending else {
            return self.document.text().to_string();
        };

        let mut preview = self.document.clone();
        match preview.replace_range(pending.suggestion.anchor(), pending.suggestion.proposed()) {
            Ok(()) => preview.text().to_string(),
            Err(_) => self.document.text().to_string(),
        }
    }

    /// Capture a selection the user made in the visible text.
    ///
    /// While a suggestion is pending, ranges before or after the proposal are
    /// mapped back to committed offsets. A range touching the proposal itself
    /// has no committed counterpart.
    ///
    /// # Errors
    ///
    /// - [`EditorError::SuggestionPending`] if the range overlaps the pending proposal
    /// - [`EditorError::InvalidRange`] if the range runs past the end
    #[track_caller]
    pub fn capture_selection(
        &self,
        range: SelectionRange,
    ) -> Result<CapturedSelection, EditorError> {
        let committed = self.to_committed(range)?;
        self.document.capture_selection(committed)
    }

    /// Overlay `proposed` on the captured selection and start listening for Enter/Escape.
    ///
    /// # Errors
    ///
    /// - [`EditorError::SuggestionPending`] if another suggestion is still open
    /// - [`EditorError::StaleSelection`] if the document changed since capture
    #[track_caller]
    pub fn insert_suggestion(
        &mut self,
        selection: &CapturedSelection,
        proposed: impl Into<String>,
    ) -> Result<Uuid, EditorError> {
        if self.pending.is_some() {
            return Err(EditorError::SuggestionPending {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.document.ensure_current(selection)?;

        let suggestion = Suggestion::new(selection.range(), selection.text(), proposed);
        let id = suggestion.id();
        let listener = self.listeners.register(id);
        debug!("Suggestion {} inserted at {:?}", id, selection.range());

        self.pending = Some(Pending {
            suggestion,
            listener,
        });
        Ok(id)
    }

    /// Commit the proposal into the document.
    #[track_caller]
    pub fn accept(&mut self) -> Result<Suggestion, EditorError> {
        let mut pending = self.take_pending()?;
        let anchor = pending.suggestion.anchor();
        let proposed = pending.suggestion.accept()?.to_string();

        self.document.replace_range(anchor, &proposed)?;
        debug!("Suggestion {} accepted", pending.suggestion.id());
        Ok(pending.suggestion)
    }

    /// Drop the proposal. The committed document was never changed, so it is
    /// already the original.
    #[track_caller]
    pub fn reject(&mut self) -> Result<Suggestion, EditorError> {
        let mut pending = self.take_pending()?;
        pending.suggestion.reject()?;
        debug!("Suggestion {} rejected", pending.suggestion.id());
        Ok(pending.suggestion)
    }

    /// Append an `expand` reply to the pending proposal.
    ///
    /// Returns `false` if the reply only echoed what was already there.
    #[track_caller]
    pub fn apply_expansion(&mut self, reply: &str) -> Result<bool, EditorError> {
        let pending = self
            .pending
            .as_mut()
            .ok_or_else(|| EditorError::NoPendingSuggestion {
                location: ErrorLocation::from(Location::caller()),
            })?;
        pending.suggestion.extend(reply)
    }

    /// Route a key press. Without a pending suggestion every key passes through.
    #[track_caller]
    pub fn handle_key(&mut self, key: &Key) -> Result<KeyOutcome, EditorError> {
        if self.pending.is_none() {
            return Ok(KeyOutcome::PassThrough);
        }

        match key {
            Key::Enter => self.accept().map(|_| KeyOutcome::Accepted),
            Key::Escape => self.reject().map(|_| KeyOutcome::Rejected),
            Key::Other(_) => Ok(KeyOutcome::PassThrough),
        }
    }

    /// A direct edit by the user, in visible-text coordinates.
    ///
    /// A pending suggestion is accepted first since the user was editing
    /// what they saw, proposal included.
    #[track_caller]
    pub fn user_edit(
        &mut self,
        range: SelectionRange,
        replacement: &str,
    ) -> Result<(), EditorError> {
        if self.pending.is_some() {
            self.accept()?;
        }
        self.document.replace_range(range, replacement)
    }

    /// Replace the whole committed document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SuggestionPending`] if a suggestion is still open.
    #[track_caller]
    pub fn replace_document(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        if self.pending.is_some() {
            return Err(EditorError::SuggestionPending {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.document.set_text(text);
        Ok(())
    }

    #[track_caller]
    fn to_committed(&self, range: SelectionRange) -> Result<SelectionRange, EditorError> {
        let Some(pending) = &self.pending else {
            return Ok(range);
        };

        let anchor = pending.suggestion.anchor();
        let proposal_end = anchor.start() + char_len(pending.suggestion.proposed());

        if range.end() <= anchor.start() {
            return Ok(range);
        }
        if range.start() >= proposal_end {
            let shift = |offset: usize| offset - proposal_end + anchor.end();
            return SelectionRange::new(shift(range.start()), shift(range.end()));
        }

        Err(EditorError::SuggestionPending {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Detach the pending suggestion and its listener together.
    #[track_caller]
    fn take_pending(&mut self) -> Result<Pending, EditorError> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| EditorError::NoPendingSuggestion {
                location: ErrorLocation::from(Location::caller()),
            })?;
        self.listeners.remove(pending.listener);
        Ok(pending)
    }
}
