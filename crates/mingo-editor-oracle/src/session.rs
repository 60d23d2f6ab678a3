//! Editing session: a buffer plus its diagnostics pipeline.

use crate::config::EditorConfig;
use crate::error::OracleError;
use crate::scheduler::{
    Clock, DiagnosticScheduler, DiagnosticsDispatcher, SchedulerEvent, SystemClock,
};
use mingo_editor_core::{
    EditError, FormatOptions, MarkerSet, QuickFix, SourceBuffer, TextEdit, format_with,
    propose_all,
};
use mingo_editor_lang::{CompletionItem, completions};
use std::ops::Range;

/// Owns a [`SourceBuffer`] and keeps its published diagnostics in step with edits.
///
/// Every mutation goes through the session so the scheduler sees it.
#[derive(Debug)]
pub struct EditingSession<D: DiagnosticsDispatcher, C: Clock = SystemClock> {
    buffer: SourceBuffer,
    scheduler: DiagnosticScheduler<C>,
    dispatcher: D,
    format: FormatOptions,
}

impl<D: DiagnosticsDispatcher, C: Clock> EditingSession<D, C> {
    /// Open a session on `text`. Diagnostics for the initial text are scheduled immediately.
    pub fn new(text: &str, dispatcher: D, clock: C, config: &EditorConfig) -> Self {
        let mut scheduler = DiagnosticScheduler::new(config.diagnostics.debounce(), clock);
        scheduler.notify_edit();
        Self {
            buffer: SourceBuffer::new(text),
            scheduler,
            dispatcher,
            format: config.format.options(),
        }
    }

    /// The buffer.
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// The dispatcher, mutably.
    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// The last published marker set, which may describe an older generation.
    pub fn markers(&self) -> &MarkerSet {
        self.scheduler.markers()
    }

    /// The published marker set if it describes the buffer as it is now.
    pub fn current_markers(&self) -> Option<&MarkerSet> {
        self.scheduler.markers_for(self.buffer.generation())
    }

    /// Returns `true` while a diagnostics request is pending or in flight.
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_scheduled() || self.scheduler.in_flight().is_some()
    }

    /// Insert `text` at character `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.buffer.insert(offset, text);
        self.scheduler.notify_edit();
    }

    /// Replace the character range `range` with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        self.buffer.replace(range, text);
        self.scheduler.notify_edit();
    }

    /// Replace the whole document.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.scheduler.notify_edit();
    }

    /// Apply a line/column edit. Returns the replaced character range.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Range<usize> {
        let range = self.buffer.apply_edit(edit);
        self.scheduler.notify_edit();
        range
    }

    /// Drive the diagnostics pipeline.
    pub fn poll(&mut self) -> Result<Vec<SchedulerEvent>, OracleError> {
        self.scheduler.poll(&self.buffer, &mut self.dispatcher)
    }

    /// Quick fixes for the current markers. Empty if the markers are stale.
    pub fn quick_fixes(&self) -> Vec<QuickFix> {
        match self.current_markers() {
            Some(markers) => propose_all(&self.buffer, markers),
            None => Vec::new(),
        }
    }

    /// Apply a quick fix derived from the current markers.
    pub fn apply_quick_fix(&mut self, fix: &QuickFix) -> Result<Range<usize>, EditError> {
        let buffer = self.buffer.generation();
        if self.current_markers().is_none() {
            return Err(EditError::StaleMarkers {
                markers: self.scheduler.markers().generation,
                buffer,
            });
        }
        for position in [fix.edit.start, fix.edit.end] {
            if self.buffer.clamp_position(position) != position {
                return Err(EditError::OutOfRange {
                    line: position.line,
                    column: position.column,
                });
            }
        }
        Ok(self.apply_edit(&fix.edit))
    }

    /// Apply every quick fix for the current markers. Returns how many were applied.
    ///
    /// Edits are applied back to front so earlier positions stay valid.
    pub fn apply_all_quick_fixes(&mut self) -> usize {
        let mut fixes = self.quick_fixes();
        if fixes.is_empty() {
            return 0;
        }
        fixes.sort_by(|a, b| b.edit.start.cmp(&a.edit.start));
        for fix in &fixes {
            self.buffer.apply_edit(&fix.edit);
        }
        self.scheduler.notify_edit();
        fixes.len()
    }

    /// Reformat the buffer in place. Returns `false` (and leaves the buffer untouched) if the
    /// text is already formatted.
    pub fn format_buffer(&mut self) -> bool {
        let text = self.buffer.text();
        let formatted = format_with(&text, &self.format);
        if formatted == text {
            return false;
        }
        self.set_text(&formatted);
        true
    }

    /// Completion items for the buffer.
    pub fn completions(&self) -> Vec<CompletionItem> {
        completions(&self.buffer.text())
    }
}
