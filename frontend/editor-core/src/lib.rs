//! Rendering-independent core of the SmartNotes editor.
//!
//! The UI layer owns the DOM (or whatever surface it draws on) and forwards
//! pointer, key and context-menu events here. State lives in [`Editor`];
//! [`render`] turns it back into something drawable.

pub mod document;
pub mod editor;
pub mod error;
pub mod relay_client;
pub mod render;
pub mod session;
pub mod suggestion;

#[cfg(test)]
mod tests;

pub use document::{CapturedSelection, Document, SelectionRange};
pub use editor::{Editor, Key, KeyOutcome};
pub use error::{EditorError, RelayClientError};
pub use relay_client::RelayClient;
pub use session::{EditorSession, ExplanationPopup, Status};
pub use suggestion::{Suggestion, SuggestionState};

pub const ANALYZE_ENDPOINT: &str = "analyze";
