//! Quick-fix synthesis for recognized diagnostic messages.
//!
//! Only one pattern class is recognized: a missing statement terminator. The fix inserts `;` at
//! the end of the marker's line rather than at the marker column, because the oracle reports the
//! position of the token *after* the missing terminator.

use crate::buffer::SourceBuffer;
use crate::diagnostics::{Marker, MarkerSet};
use crate::edit::{TextEdit, TextPosition};

/// Statement terminator inserted by [`propose`].
pub const STATEMENT_TERMINATOR: &str = ";";

/// Lower-case message fragments that identify a missing terminator.
const MISSING_TERMINATOR_PHRASES: [&str; 2] =
    ["expected next token to be semicolon", "missing semicolon"];

/// A single quick-fix action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFix {
    /// Human-readable action title.
    pub title: String,
    /// The edit to apply.
    pub edit: TextEdit,
}

/// Returns `true` if `message` reports a missing statement terminator (case-insensitive).
pub fn is_missing_terminator(message: &str) -> bool {
    let message = message.to_lowercase();
    MISSING_TERMINATOR_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}

/// Propose a fix for `marker`, whose line ends at `line_end_column`.
///
/// Returns `None` for messages that are not recognized.
pub fn propose(marker: &Marker, line_end_column: usize) -> Option<QuickFix> {
    if !is_missing_terminator(&marker.message) {
        return None;
    }

    let at = TextPosition::new(marker.start_line, line_end_column.max(1));
    Some(QuickFix {
        title: format!("Insert missing '{STATEMENT_TERMINATOR}'"),
        edit: TextEdit::insert(at, STATEMENT_TERMINATOR),
    })
}

/// Propose fixes for every marker in `markers`, measuring line ends in `buffer`.
///
/// Markers are clamped to the buffer first. A line receives at most one fix.
pub fn propose_all(buffer: &SourceBuffer, markers: &MarkerSet) -> Vec<QuickFix> {
    let mut out = Vec::<QuickFix>::new();
    for marker in &markers.markers {
        let marker = buffer.clamp_marker(marker);
        let Some(fix) = propose(&marker, buffer.line_end_column(marker.start_line)) else {
            continue;
        };
        if out.iter().any(|existing| existing.edit == fix.edit) {
            continue;
        }
        out.push(fix);
    }
    out
}
