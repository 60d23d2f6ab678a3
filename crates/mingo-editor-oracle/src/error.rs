use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while talking to an external oracle.
pub enum OracleError {
    #[error("I/O error: {0}")]
    /// Spawning or communicating with the oracle process failed.
    Io(#[from] io::Error),

    #[error("malformed oracle output: {0}")]
    /// The oracle's stdout was not the expected JSON.
    Json(#[from] serde_json::Error),

    #[error("diagnostics worker stopped")]
    /// The background dispatcher is no longer accepting requests.
    Disconnected,
}

#[derive(Debug, Error)]
/// Errors produced while loading [`EditorConfig`](crate::EditorConfig).
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    /// The configuration file is not valid YAML for the expected shape.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error reading {path}: {source}")]
    /// The configuration file exists but could not be read.
    Io {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

#[derive(Debug, Error)]
/// Errors produced by [`Workspace`](crate::Workspace) file operations.
pub enum WorkspaceError {
    #[error("invalid path: {0}")]
    /// The path is absolute or escapes the workspace root.
    InvalidPath(String),

    #[error("not found: {0}")]
    /// No file matched the requested name.
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    /// Filesystem I/O failed.
    Io {
        /// Absolute path involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}
