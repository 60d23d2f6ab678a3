#![warn(missing_docs)]
//! `mingo-editor-oracle` - the parts of the Mingo editor that talk to the outside world.
//!
//! [`mingo_editor_core`] is pure and synchronous. This crate adds time, processes and the
//! filesystem around it:
//!
//! - [`DiagnosticScheduler`]: quiet-period debounce plus generation tagging, driven by an
//!   injected [`Clock`] and [`DiagnosticsDispatcher`]
//! - [`ThreadedDispatcher`]: runs a [`DiagnosticsOracle`] on a background thread
//! - [`ProcessDiagnosticsOracle`] / [`ProcessExecutionOracle`]: external executables fed the
//!   buffer on stdin
//! - [`EditingSession`]: buffer + scheduler + quick fixes + formatting behind one API
//! - [`Workspace`]: root-confined file listing, read and write
//! - [`EditorConfig`]: YAML configuration
//!
//! # Example
//!
//! ```rust
//! use mingo_editor_oracle::{
//!     EditingSession, EditorConfig, ManualClock, OracleOutcome, SchedulerEvent,
//!     ThreadedDispatcher,
//! };
//! use mingo_editor_core::DiagnosticRecord;
//!
//! let oracle = |_: &str| {
//!     OracleOutcome::Records(vec![DiagnosticRecord::new(2, 9, "missing semicolon")])
//! };
//! let clock = ManualClock::new();
//! let dispatcher = ThreadedDispatcher::spawn(oracle).unwrap();
//! let config = EditorConfig::default();
//! let mut session = EditingSession::new("let x = 1;\nprint(x)", dispatcher, clock.clone(), &config);
//!
//! clock.advance(config.diagnostics.debounce());
//! let generation = session.buffer().generation();
//! let mut events = session.poll().unwrap();
//! assert_eq!(events[0], SchedulerEvent::Dispatched(generation));
//! while !events.contains(&SchedulerEvent::Published(generation)) {
//!     std::thread::yield_now();
//!     events = session.poll().unwrap();
//! }
//!
//! let fixes = session.quick_fixes();
//! session.apply_quick_fix(&fixes[0]).unwrap();
//! assert_eq!(session.buffer().text(), "let x = 1;\nprint(x);");
//! ```

pub mod config;
pub mod error;
pub mod oracle;
pub mod process;
pub mod scheduler;
pub mod session;
pub mod worker;
pub mod workspace;

pub use config::{DiagnosticsConfig, EditorConfig, FormatConfig, OracleConfig, WorkspaceConfig};
pub use error::{ConfigError, OracleError, WorkspaceError};
pub use oracle::{
    DiagnosticsOracle, ExecutionResult, OracleOutcome, ProcessDiagnosticsOracle,
    ProcessExecutionOracle, parse_diagnostics_output,
};
pub use process::{ProcessOutput, run_with_stdin};
pub use scheduler::{
    Clock, DiagnosticScheduler, DiagnosticsDispatcher, DiagnosticsRequest, DiagnosticsResponse,
    ManualClock, SchedulerEvent, SystemClock,
};
pub use session::EditingSession;
pub use worker::ThreadedDispatcher;
pub use workspace::{EXAMPLES_DIR, Workspace, WorkspaceEntry};
