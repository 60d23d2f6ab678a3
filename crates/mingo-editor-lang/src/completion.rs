//! Buffer-based completion provider.
//!
//! Completions are computed from the whole buffer text on every request: keywords, a fixed set
//! of snippets, and every identifier that appears in the buffer.

use crate::{KEYWORDS, LanguageConfig};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z_][a-zA-Z0-9_]*\b").expect("valid identifier regex"));

/// What a completion item inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A reserved word.
    Keyword,
    /// A multi-line template with tab stops.
    Snippet,
    /// A built-in function call.
    Function,
    /// An identifier found in the buffer.
    Variable,
}

/// A single completion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Text shown in the completion list.
    pub label: String,
    /// Item kind.
    pub kind: CompletionKind,
    /// Text to insert. Snippet placeholders use `${n:name}` / `$0` syntax.
    pub insert_text: String,
    /// Optional short description.
    pub detail: Option<String>,
    /// Whether `insert_text` contains snippet placeholders.
    pub is_snippet: bool,
}

impl CompletionItem {
    fn plain(label: &str, kind: CompletionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            insert_text: label.to_string(),
            detail: None,
            is_snippet: false,
        }
    }

    fn snippet(label: &str, kind: CompletionKind, detail: Option<&str>, template: &str) -> Self {
        Self {
            label: label.to_string(),
            kind,
            insert_text: template.to_string(),
            detail: detail.map(str::to_string),
            is_snippet: true,
        }
    }

    /// Returns `true` if the label starts with `prefix`. An empty prefix matches everything.
    pub fn matches(&self, prefix: &str) -> bool {
        self.label.starts_with(prefix)
    }
}

fn snippets() -> [CompletionItem; 4] {
    [
        CompletionItem::snippet(
            "fn snippet",
            CompletionKind::Snippet,
            Some("function"),
            "fn ${1:name}(${2:args}) {\n\t$0\n}",
        ),
        CompletionItem::snippet(
            "if snippet",
            CompletionKind::Snippet,
            Some("if/else"),
            "if (${1:cond}) {\n\t$0\n} else {\n\t\n}",
        ),
        CompletionItem::snippet(
            "while snippet",
            CompletionKind::Snippet,
            Some("while loop"),
            "while (${1:cond}) {\n\t$0\n}",
        ),
        CompletionItem::snippet("print", CompletionKind::Function, None, "print(${1:expr});"),
    ]
}

/// Non-keyword identifiers in `source`, deduplicated in first-seen order.
pub fn identifiers(source: &str) -> Vec<&str> {
    let language = LanguageConfig::mingo();
    let mut seen = HashSet::<&str>::new();
    IDENTIFIER
        .find_iter(source)
        .map(|m| m.as_str())
        .filter(|word| !language.is_keyword(word) && seen.insert(*word))
        .collect()
}

/// All completion items for `source`: keywords, snippets, then buffer identifiers.
pub fn completions(source: &str) -> Vec<CompletionItem> {
    let mut items = KEYWORDS
        .iter()
        .map(|keyword| CompletionItem::plain(keyword, CompletionKind::Keyword))
        .collect::<Vec<_>>();
    items.extend(snippets());
    items.extend(
        identifiers(source)
            .into_iter()
            .map(|name| CompletionItem::plain(name, CompletionKind::Variable)),
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_skip_keywords_and_duplicates() {
        let source = "let total = 0; while (total < n) { let total = total + step; }";
        assert_eq!(identifiers(source), vec!["total", "n", "step"]);
    }

    #[test]
    fn test_identifiers_ignore_numbers() {
        assert_eq!(identifiers("let x1 = 42 + _y;"), vec!["x1", "_y"]);
    }
}
