#![warn(missing_docs)]
//! `mingo-editor-lang` - data-driven language configuration for the Mingo editor.
//!
//! This crate intentionally stays lightweight and knows nothing about diagnostics or processes.
//! It describes the target language the way an editor needs it (keywords, snippets, file
//! extension) and provides a buffer-based completion provider.

pub mod completion;

pub use completion::{CompletionItem, CompletionKind, completions, identifiers};

/// Keywords of the Mingo language, in the order they are offered for completion.
pub const KEYWORDS: [&str; 9] = [
    "fn", "let", "if", "else", "return", "true", "false", "while", "print",
];

/// Static description of the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Source file extension (without the dot).
    pub extension: &'static str,
    /// Reserved words.
    pub keywords: &'static [&'static str],
}

impl LanguageConfig {
    /// The Mingo language.
    pub const fn mingo() -> Self {
        Self {
            extension: "mg",
            keywords: &KEYWORDS,
        }
    }

    /// Returns `true` if `word` is a reserved word.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(&word)
    }

    /// Returns `true` if `path` names a source file of this language.
    pub fn matches_path(&self, path: &str) -> bool {
        path.rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext == self.extension)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::mingo()
    }
}
