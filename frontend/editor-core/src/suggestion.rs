//! Provisional AI edits and the key listeners that resolve them.
//!
//! A [`Suggestion`] never touches the document itself. It carries the text it
//! would replace and the text it proposes; the [`crate::Editor`] decides what
//! the document looks like once it is accepted or rejected.

use crate::document::SelectionRange;
use crate::error::EditorError;

use common::ErrorLocation;

use std::fmt::{Display, Formatter};
use std::panic::Location;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    Inserted,
    Accepted,
    Rejected,
}

impl Display for SuggestionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionState::Inserted => write!(f, "inserted"),
            SuggestionState::Accepted => write!(f, "accepted"),
            SuggestionState::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    id: Uuid,
    original: String,
    proposed: String,
    anchor: SelectionRange,
    state: SuggestionState,
}

impl Suggestion {
    /// `original` is the committed text under `anchor` at insertion time.
    pub fn new(
        anchor: SelectionRange,
        original: impl Into<String>,
        proposed: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original: original.into(),
            proposed: proposed.into(),
            anchor,
            state: SuggestionState::Inserted,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn proposed(&self) -> &str {
        &self.proposed
    }

    pub fn anchor(&self) -> SelectionRange {
        self.anchor
    }

    pub fn state(&self) -> SuggestionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SuggestionState::Inserted
    }

    /// `Inserted → Accepted`. Returns the text that replaces the anchor.
    #[track_caller]
    pub fn accept(&mut self) -> Result<&str, EditorError> {
        self.transition("accept", SuggestionState::Accepted)?;
        Ok(&self.proposed)
    }

    /// `Inserted → Rejected`. Returns the text to keep under the anchor.
    #[track_caller]
    pub fn reject(&mut self) -> Result<&str, EditorError> {
        self.transition("reject", SuggestionState::Rejected)?;
        Ok(&self.original)
    }

    /// Append the novel part of an `expand` reply. State stays `Inserted`.
    ///
    /// Returns `false` when the reply added nothing.
    #[track_caller]
    pub fn extend(&mut self, reply: &str) -> Result<bool, EditorError> {
        self.ensure_pending("expand")?;

        let novel = novel_portion(&self.proposed, reply);
        if novel.trim().is_empty() {
            return Ok(false);
        }

        self.proposed = join_expansion(&self.proposed, novel);
        Ok(true)
    }

    #[track_caller]
    fn transition(
        &mut self,
        action: &'static str,
        next: SuggestionState,
    ) -> Result<(), EditorError> {
        self.ensure_pending(action)?;
        self.state = next;
        Ok(())
    }

    #[track_caller]
    fn ensure_pending(&self, action: &'static str) -> Result<(), EditorError> {
        if !self.is_pending() {
            return Err(EditorError::InvalidTransition {
                action,
                state: self.state.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

/// The part of `reply` that is not an echo of `current`.
///
/// Models asked to continue a passage often repeat it first. Surrounding
/// whitespace is ignored when matching the echo, and the echo must end on a
/// word boundary: "The cat" is not echoed by "The category".
pub fn novel_portion<'a>(current: &str, reply: &'a str) -> &'a str {
    let echo = current.trim();
    let candidate = reply.trim_start();

    if !echo.is_empty() {
        if let Some(rest) = candidate.strip_prefix(echo) {
            if ends_on_word_boundary(echo, rest) {
                return rest.trim_end();
            }
        }
    }

    reply.trim_end()
}

fn ends_on_word_boundary(echo: &str, rest: &str) -> bool {
    let echo_ends_word = echo.ends_with(|c: char| !c.is_alphanumeric());
    let rest_starts_word = rest.starts_with(char::is_alphanumeric);
    echo_ends_word || !rest_starts_word
}

/// `current` followed by `novel`, with one space between them unless either side
/// already supplies whitespace. Never doubles whitespace at the seam.
pub fn join_expansion(current: &str, novel: &str) -> String {
    let novel = if current.ends_with(char::is_whitespace) {
        novel.trim_start()
    } else {
        novel
    };
    let needs_space = !current.is_empty()
        && !current.ends_with(char::is_whitespace)
        && !novel.starts_with(char::is_whitespace);

    if needs_space {
        format!("{} {}", current, novel)
    } else {
        format!("{}{}", current, novel)
    }
}

/// Handle for one registered key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

/// Key listeners installed for pending suggestions.
///
/// Every registration must be matched by a removal when its suggestion is
/// resolved; [`KeyListeners::active_count`] lets callers check.
#[derive(Debug, Default)]
pub struct KeyListeners {
    active: Vec<(ListenerId, Uuid)>,
}

impl KeyListeners {
    pub fn register(&mut self, suggestion_id: Uuid) -> ListenerId {
        let id = ListenerId(Uuid::new_v4());
        self.active.push((id, suggestion_id));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(listener, _)| *listener != id);
        self.active.len() != before
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
