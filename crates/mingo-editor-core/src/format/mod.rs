//! Parser-free source reformatter.
//!
//! [`format`] re-renders unstructured source into an indented canonical form using only
//! delimiter-level information:
//!
//! 1. tabs are expanded and whitespace runs collapsed ([`tokenizer::normalize_whitespace`]);
//! 2. the text is split into delimiter / whitespace / word fragments ([`tokenizer::tokenize`]);
//! 3. the [`IndentEngine`] turns fragments into [`FormattedLine`]s;
//! 4. lines are joined with per-depth indentation ([`render`]).
//!
//! The pass is linear and cannot fail. Malformed input degrades (e.g. everything on one line)
//! instead of producing an error.

pub mod indent;
pub mod tokenizer;

pub use indent::{FormattedLine, IndentEngine};
pub use tokenizer::{Fragment, Whitespace};

/// Formatter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indent level.
    pub indent_width: usize,
    /// Spaces a literal tab expands to before whitespace is collapsed.
    pub tab_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            tab_width: 4,
        }
    }
}

/// Format `source` with [`FormatOptions::default`].
pub fn format(source: &str) -> String {
    format_with(source, &FormatOptions::default())
}

/// Format `source` with explicit options.
pub fn format_with(source: &str, options: &FormatOptions) -> String {
    render(&format_lines_with(source, options), options.indent_width)
}

/// Run the tokenizer and indent engine, returning the structured lines.
pub fn format_lines(source: &str) -> Vec<FormattedLine> {
    format_lines_with(source, &FormatOptions::default())
}

/// Like [`format_lines`], with explicit options.
pub fn format_lines_with(source: &str, options: &FormatOptions) -> Vec<FormattedLine> {
    let normalized = tokenizer::normalize_whitespace(source, options.tab_width);
    let mut engine = IndentEngine::new();
    for fragment in tokenizer::tokenize(&normalized) {
        engine.push(fragment);
    }
    engine.finish()
}

/// Join lines with `\n`, indenting each by `indent_width` spaces per depth level.
///
/// Runs of three or more blank lines collapse to a single blank line.
pub fn render(lines: &[FormattedLine], indent_width: usize) -> String {
    let mut out = Vec::<String>::with_capacity(lines.len());
    let mut blank_run = 0usize;

    for line in lines {
        if line.text.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        flush_blank_run(&mut out, blank_run);
        blank_run = 0;
        out.push(format!(
            "{}{}",
            " ".repeat(line.depth * indent_width),
            line.text
        ));
    }
    flush_blank_run(&mut out, blank_run);

    out.join("\n")
}

fn flush_blank_run(out: &mut Vec<String>, run: usize) {
    match run {
        0 => {}
        1 | 2 => out.extend(std::iter::repeat_n(String::new(), run)),
        _ => out.push(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_collapses_long_blank_runs() {
        let lines = vec![
            FormattedLine::new(0, "a"),
            FormattedLine::new(0, ""),
            FormattedLine::new(0, ""),
            FormattedLine::new(0, ""),
            FormattedLine::new(1, "b"),
            FormattedLine::new(0, ""),
            FormattedLine::new(0, ""),
            FormattedLine::new(0, "c"),
        ];
        assert_eq!(render(&lines, 2), "a\n\n  b\n\n\nc");
    }

    #[test]
    fn test_indent_width_option() {
        let options = FormatOptions {
            indent_width: 4,
            tab_width: 4,
        };
        assert_eq!(format_with("if(x){y;}", &options), "if(x) {\n    y;\n}");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(format(""), "");
        assert_eq!(format(" \n\t "), "");
    }
}
