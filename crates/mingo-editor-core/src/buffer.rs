//! Generation-tracked source buffer.
//!
//! [`SourceBuffer`] stores the document in a [`Rope`] and bumps a [`Generation`] counter on every
//! mutation. Asynchronously computed state (diagnostics markers) is tagged with the generation it
//! was computed for and is only applied while that generation is still current.
//!
//! All public coordinates are 1-based `(line, column)` pairs counted in Unicode scalar values,
//! matching what the diagnostics oracle reports.

use crate::diagnostics::Marker;
use crate::edit::{TextEdit, TextPosition};
use ropey::Rope;
use std::fmt;
use std::ops::Range;

/// Monotonically increasing identifier of a buffer's content version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation of a freshly created buffer.
    pub const INITIAL: Generation = Generation(0);

    /// Wrap a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The generation that follows `self`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable document, owned exclusively by the editing surface.
///
/// Lines are separated by `\n` only (a preceding `\r` is treated as part of the terminator),
/// the same way the diagnostics oracle counts them.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    rope: Rope,
    generation: Generation,
}

impl SourceBuffer {
    /// Create a buffer holding `text` at [`Generation::INITIAL`].
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            generation: Generation::INITIAL,
        }
    }

    /// Current content generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Full text snapshot.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines (an empty buffer has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let idx = line.checked_sub(1)?;
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(idx).to_string();
        while text.ends_with(['\n', '\r']) {
            text.pop();
        }
        Some(text)
    }

    /// Length of the 1-based `line` in characters, excluding the terminator.
    ///
    /// Out-of-range lines report 0.
    pub fn line_len(&self, line: usize) -> usize {
        let Some(idx) = line.checked_sub(1) else {
            return 0;
        };
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(idx);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    /// Column just past the last character of the 1-based `line`.
    pub fn line_end_column(&self, line: usize) -> usize {
        self.line_len(line) + 1
    }

    /// Clamp a 1-based position to the buffer's extents.
    ///
    /// Lines are clamped to `1..=line_count`, columns to `1..=line_end_column`.
    pub fn clamp_position(&self, position: TextPosition) -> TextPosition {
        let line = position.line.clamp(1, self.line_count());
        let column = position.column.clamp(1, self.line_end_column(line));
        TextPosition::new(line, column)
    }

    /// Clamp a marker to valid extents, keeping `start <= end`.
    pub fn clamp_marker(&self, marker: &Marker) -> Marker {
        let start = self.clamp_position(marker.start());
        let mut end = self.clamp_position(marker.end());
        if end < start {
            end = start;
        }
        Marker {
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
            message: marker.message.clone(),
        }
    }

    /// Convert a 1-based position into a character offset (clamped).
    pub fn position_to_offset(&self, position: TextPosition) -> usize {
        let position = self.clamp_position(position);
        self.rope.line_to_char(position.line - 1) + (position.column - 1)
    }

    /// Convert a character offset into a 1-based position (clamped).
    pub fn offset_to_position(&self, offset: usize) -> TextPosition {
        let offset = offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line_idx);
        self.clamp_position(TextPosition::new(line_idx + 1, column + 1))
    }

    /// Half-open character-offset range covered by `marker`, for renderers.
    pub fn marker_offsets(&self, marker: &Marker) -> Range<usize> {
        let start = self.position_to_offset(marker.start());
        let end = self.position_to_offset(marker.end());
        start.min(end)..start.max(end)
    }

    /// Insert `text` at character `offset` (clamped).
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
        self.bump();
    }

    /// Replace the character range `range` (clamped) with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.bump();
    }

    /// Replace the whole document.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.bump();
    }

    /// Apply a line/column edit. Returns the replaced character range (pre-edit offsets).
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Range<usize> {
        let start = self.position_to_offset(edit.start);
        let end = self.position_to_offset(edit.end);
        let range = start.min(end)..start.max(end);
        self.replace(range.clone(), &edit.new_text);
        range
    }

    fn bump(&mut self) {
        self.generation = self.generation.next();
    }
}
