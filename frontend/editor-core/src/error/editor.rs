use common::ErrorLocation;
use models::ModelError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum EditorError {
    #[error("Invalid Range: {start}..{end}: {reason} {location}")]
    InvalidRange {
        start: usize,
        end: usize,
        reason: String,
        location: ErrorLocation,
    },

    /// The document changed after the selection was captured.
    #[error("Stale Selection: captured at revision {captured}, document is at {current} {location}")]
    StaleSelection {
        captured: u64,
        current: u64,
        location: ErrorLocation,
    },

    #[error("Invalid Transition: cannot {action} a suggestion that is {state} {location}")]
    InvalidTransition {
        action: &'static str,
        state: String,
        location: ErrorLocation,
    },

    #[error("Suggestion Pending: accept or reject the current suggestion first {location}")]
    SuggestionPending { location: ErrorLocation },

    #[error("No Pending Suggestion {location}")]
    NoPendingSuggestion { location: ErrorLocation },

    #[error(transparent)]
    Request(#[from] ModelError),
}
