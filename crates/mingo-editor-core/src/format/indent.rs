//! Streaming indent engine.
//!
//! Consumes [`Fragment`]s in order and emits [`FormattedLine`]s, tracking one indent depth that
//! `{` increments and `}` decrements. There is no syntax tree: every decision is made from the
//! current fragment and the pending content buffer.

use super::tokenizer::{Fragment, Whitespace};

/// One output line: indent depth plus literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// Indent depth (number of indent units).
    pub depth: usize,
    /// Line text without indentation.
    pub text: String,
}

impl FormattedLine {
    /// Create a new line.
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// Single-pass line builder.
#[derive(Debug, Default)]
pub struct IndentEngine {
    lines: Vec<FormattedLine>,
    content: String,
    depth: usize,
    // Last line was ended by a newline without a terminator.
    open_line: bool,
}

impl IndentEngine {
    /// Create an engine at depth 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current indent depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Feed one fragment.
    pub fn push(&mut self, fragment: Fragment<'_>) {
        match fragment {
            Fragment::Delimiter('{') => {
                let content = self.take_content();
                let text = if content.is_empty() {
                    "{".to_string()
                } else {
                    format!("{content} {{")
                };
                self.emit(text);
                self.depth += 1;
            }
            Fragment::Delimiter('}') => {
                self.flush_statement();
                // Unbalanced `}` stays at column 0 instead of going negative.
                self.depth = self.depth.saturating_sub(1);
                self.emit("}".to_string());
            }
            Fragment::Delimiter(';') => {
                let content = self.take_content();
                if !content.is_empty() {
                    self.emit(format!("{content};"));
                } else if let Some(last) = self.lines.last_mut()
                    && last.text == "}"
                {
                    last.text.push(';');
                } else {
                    self.emit(";".to_string());
                }
            }
            Fragment::Whitespace(Whitespace::Newline) => {
                let content = self.take_content();
                if !content.is_empty() {
                    self.emit(content);
                    self.open_line = true;
                }
            }
            Fragment::Whitespace(Whitespace::Space) => {
                if !self.content.is_empty() && !self.content.ends_with(' ') {
                    self.content.push(' ');
                }
            }
            Fragment::Delimiter(ch) => self.content.push(ch),
            Fragment::Word(word) => self.content.push_str(word.trim()),
        }
    }

    /// Flush pending content as a final statement and return the lines.
    ///
    /// A trailing line that was only ended by a newline is the final statement too, so a source
    /// with or without a final newline formats the same way.
    pub fn finish(mut self) -> Vec<FormattedLine> {
        if self.content.trim().is_empty()
            && self.open_line
            && let Some(last) = self.lines.last_mut()
            && !last.text.ends_with(';')
        {
            last.text.push(';');
        }
        self.flush_statement();
        self.lines
    }

    fn flush_statement(&mut self) {
        let content = self.take_content();
        if content.is_empty() {
            return;
        }
        if content.ends_with(';') {
            self.emit(content);
        } else {
            self.emit(format!("{content};"));
        }
    }

    fn take_content(&mut self) -> String {
        let content = self.content.trim().to_string();
        self.content.clear();
        content
    }

    fn emit(&mut self, text: String) {
        self.open_line = false;
        self.lines.push(FormattedLine::new(self.depth, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tokenizer::tokenize;

    fn run(source: &str) -> Vec<FormattedLine> {
        let mut engine = IndentEngine::new();
        for fragment in tokenize(source) {
            engine.push(fragment);
        }
        engine.finish()
    }

    #[test]
    fn test_braces_change_depth() {
        assert_eq!(
            run("fn f(a,b){print(a);}"),
            vec![
                FormattedLine::new(0, "fn f(a,b) {"),
                FormattedLine::new(1, "print(a);"),
                FormattedLine::new(0, "}"),
            ]
        );
    }

    #[test]
    fn test_closing_brace_terminates_statement() {
        assert_eq!(
            run("if(x){y}"),
            vec![
                FormattedLine::new(0, "if(x) {"),
                FormattedLine::new(1, "y;"),
                FormattedLine::new(0, "}"),
            ]
        );
    }

    #[test]
    fn test_unbalanced_closing_brace_clamps_at_zero() {
        assert_eq!(
            run("}}a"),
            vec![
                FormattedLine::new(0, "}"),
                FormattedLine::new(0, "}"),
                FormattedLine::new(0, "a;"),
            ]
        );
    }

    #[test]
    fn test_semicolon_after_brace_joins_it() {
        assert_eq!(
            run("let f = fn(x){x};;"),
            vec![
                FormattedLine::new(0, "let f = fn(x) {"),
                FormattedLine::new(1, "x;"),
                FormattedLine::new(0, "};"),
                FormattedLine::new(0, ";"),
            ]
        );
    }

    #[test]
    fn test_newline_breaks_without_terminator() {
        assert_eq!(
            run("let x = 1\nlet y = 2"),
            vec![
                FormattedLine::new(0, "let x = 1"),
                FormattedLine::new(0, "let y = 2;"),
            ]
        );
    }

    #[test]
    fn test_trailing_newline_still_terminates_last_statement() {
        assert_eq!(
            run("let x = 1\nlet y = 2\n\n"),
            vec![
                FormattedLine::new(0, "let x = 1"),
                FormattedLine::new(0, "let y = 2;"),
            ]
        );
        assert_eq!(run(",\n"), vec![FormattedLine::new(0, ",;")]);
    }
}
