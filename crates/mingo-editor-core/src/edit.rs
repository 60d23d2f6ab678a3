//! Line/column text edits.

use crate::buffer::Generation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 1-based `(line, column)` position, columns counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextPosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl TextPosition {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Replace the text between `start` and `end` (half-open) with `new_text`.
///
/// An insertion has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// Range start (inclusive).
    pub start: TextPosition,
    /// Range end (exclusive).
    pub end: TextPosition,
    /// Replacement text (may contain newlines).
    pub new_text: String,
}

impl TextEdit {
    /// An insertion of `text` at `at`.
    pub fn insert(at: TextPosition, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            new_text: text.into(),
        }
    }

    /// Returns `true` if the edit removes nothing.
    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors produced when applying derived edits to a buffer.
pub enum EditError {
    #[error("markers were computed for generation {markers}, buffer is at generation {buffer}")]
    /// The marker set an edit was derived from no longer matches the buffer.
    StaleMarkers {
        /// Generation the markers belong to.
        markers: Generation,
        /// Current buffer generation.
        buffer: Generation,
    },

    #[error("position {line}:{column} is outside the buffer")]
    /// An edit position does not exist in the buffer.
    OutOfRange {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },
}
