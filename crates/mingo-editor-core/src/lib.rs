#![warn(missing_docs)]
//! Mingo Editor Core - diagnostics synchronization and source reformatting
//!
//! # Overview
//!
//! `mingo-editor-core` is the synchronous, I/O-free heart of the Mingo editing surface. It keeps
//! asynchronously computed error markers consistent with a mutating buffer, turns raw oracle
//! diagnostics into editable ranges and quick fixes, and re-renders source text into an indented
//! canonical form without a parse tree.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Quick-Fix Synthesizer                      │  ← Marker → TextEdit
//! ├─────────────────────────────────────────────┤
//! │  Marker Mapper (DiagnosticRecord → Marker)  │  ← Oracle output
//! ├─────────────────────────────────────────────┤
//! │  SourceBuffer (Rope + Generation)           │  ← Text storage
//! └─────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────┐
//! │  Tokenizer → Indent Engine → render         │  ← `format`
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use mingo_editor_core::{DiagnosticRecord, MarkerSet, SourceBuffer, format, propose_all};
//!
//! assert_eq!(format("fn f(a,b){print(a);}"), "fn f(a,b) {\n  print(a);\n}");
//!
//! let mut buffer = SourceBuffer::new("let x = 10;\nprint(x)");
//! let records = [DiagnosticRecord::new(2, 9, "expected next token to be SEMICOLON")];
//! let markers = MarkerSet::from_records(buffer.generation(), &records);
//!
//! let fixes = propose_all(&buffer, &markers);
//! buffer.apply_edit(&fixes[0].edit);
//! assert_eq!(buffer.text(), "let x = 10;\nprint(x);");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - generation-tracked rope buffer
//! - [`diagnostics`] - oracle records, markers and the marker mapper
//! - [`quick_fix`] - missing-terminator quick fixes
//! - [`edit`] - 1-based line/column edits
//! - [`format`] - tokenizer + indent engine
//! - [`tree`] - workspace file-tree builder

pub mod buffer;
pub mod diagnostics;
pub mod edit;
pub mod format;
pub mod quick_fix;
pub mod tree;

pub use buffer::{Generation, SourceBuffer};
pub use diagnostics::{DiagnosticRecord, MARKER_OWNER, Marker, MarkerSet, map_records};
pub use edit::{EditError, TextEdit, TextPosition};
pub use format::{FormatOptions, FormattedLine, format, format_lines, format_with};
pub use quick_fix::{QuickFix, propose, propose_all};
pub use tree::{EntryKind, TreeEntry, TreeNode, build_tree};
