//! Committed document text, selection ranges and captured selections.
//!
//! All offsets are character offsets (Unicode scalar values), matching the
//! offsets the relay puts in highlights.

use crate::error::EditorError;

use common::ErrorLocation;
use models::char_len;

use std::panic::Location;

const NBSP: char = '\u{00A0}';

/// Half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    start: usize,
    end: usize,
}

impl SelectionRange {
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if `start > end`.
    #[track_caller]
    pub fn new(start: usize, end: usize) -> Result<Self, EditorError> {
        if start > end {
            return Err(EditorError::InvalidRange {
                start,
                end,
                reason: "start is after end".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self { start, end })
    }

    /// Zero-width range at `at`.
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &SelectionRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A selection taken at a specific document revision.
///
/// Only [`Document::capture_selection`] creates these, so the text always
/// matches the range at `revision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSelection {
    range: SelectionRange,
    revision: u64,
    text: String,
}

impl CapturedSelection {
    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True for a caret or whitespace-only selection.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    revision: u64,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Text as sent for whole-document modes: NBSP folded to spaces, trimmed.
    pub fn plain_text(&self) -> String {
        self.text.replace(NBSP, " ").trim().to_string()
    }

    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if the range runs past the end.
    #[track_caller]
    pub fn capture_selection(
        &self,
        range: SelectionRange,
    ) -> Result<CapturedSelection, EditorError> {
        let text = self.slice(range)?;
        Ok(CapturedSelection {
            range,
            revision: self.revision,
            text,
        })
    }

    /// # Errors
    ///
    /// Returns [`EditorError::StaleSelection`] if the document changed since capture.
    #[track_caller]
    pub fn ensure_current(&self, selection: &CapturedSelection) -> Result<(), EditorError> {
        if selection.revision != self.revision {
            return Err(EditorError::StaleSelection {
                captured: selection.revision,
                current: self.revision,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    #[track_caller]
    pub fn slice(&self, range: SelectionRange) -> Result<String, EditorError> {
        let (start, end) = self.byte_span(range)?;
        Ok(self.text[start..end].to_string())
    }

    /// Replace `range` with `replacement` and bump the revision.
    #[track_caller]
    pub fn replace_range(
        &mut self,
        range: SelectionRange,
        replacement: &str,
    ) -> Result<(), EditorError> {
        let (start, end) = self.byte_span(range)?;
        self.text.replace_range(start..end, replacement);
        self.revision += 1;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    #[track_caller]
    fn byte_span(&self, range: SelectionRange) -> Result<(usize, usize), EditorError> {
        let len = self.char_len();
        if range.end > len {
            return Err(EditorError::InvalidRange {
                start: range.start,
                end: range.end,
                reason: format!("document has {} chars", len),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok((
            byte_offset(&self.text, range.start),
            byte_offset(&self.text, range.end),
        ))
    }
}

/// Byte index of the `chars`-th character; `text.len()` when at or past the end.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
