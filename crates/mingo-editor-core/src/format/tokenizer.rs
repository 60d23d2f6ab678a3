//! Delimiter-level tokenizer.
//!
//! The reformatter only needs to tell delimiters (`{ } ( ) ; ,`) apart from everything else, so
//! no lexical classification happens here: identifiers, literals and operators are all opaque
//! [`Fragment::Word`]s.

/// Characters isolated as their own fragments.
pub const DELIMITERS: [char; 6] = ['{', '}', '(', ')', ';', ','];

/// A normalized whitespace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whitespace {
    /// A run without a line break, collapsed to one space.
    Space,
    /// A run containing at least one line break, collapsed to one newline.
    Newline,
}

/// One piece of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// One of [`DELIMITERS`].
    Delimiter(char),
    /// A whitespace run.
    Whitespace(Whitespace),
    /// Anything else, up to the next delimiter or whitespace.
    Word(&'a str),
}

/// Returns `true` for the characters in [`DELIMITERS`].
pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Expand tabs to `tab_width` spaces, then collapse whitespace runs.
///
/// A run containing a newline becomes a single `\n` (blank lines are dropped); any other run
/// becomes a single space.
pub fn normalize_whitespace(source: &str, tab_width: usize) -> String {
    let expanded = source.replace('\t', &" ".repeat(tab_width));

    let mut out = String::with_capacity(expanded.len());
    let mut chars = expanded.chars().peekable();
    while let Some(ch) = chars.next() {
        if !ch.is_whitespace() {
            out.push(ch);
            continue;
        }

        let mut has_newline = ch == '\n';
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            has_newline |= next == '\n';
            chars.next();
        }
        out.push(if has_newline { '\n' } else { ' ' });
    }
    out
}

/// Split normalized text into fragments.
///
/// Whitespace runs are classified the same way as [`normalize_whitespace`], so un-normalized
/// input is accepted too.
pub fn tokenize(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if is_delimiter(ch) {
            fragments.push(Fragment::Delimiter(ch));
            rest = &rest[ch.len_utf8()..];
        } else if ch.is_whitespace() {
            let end = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            let run = &rest[..end];
            fragments.push(Fragment::Whitespace(if run.contains('\n') {
                Whitespace::Newline
            } else {
                Whitespace::Space
            }));
            rest = &rest[end..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || is_delimiter(c))
                .unwrap_or(rest.len());
            fragments.push(Fragment::Word(&rest[..end]));
            rest = &rest[end..];
        }
    }

    fragments
}
