//! Editor configuration.
//!
//! Loaded from YAML; every field has a default so partial files are fine:
//!
//! ```yaml
//! diagnostics:
//!   debounce_ms: 250
//! format:
//!   indent_width: 2
//!   tab_width: 4
//! oracle:
//!   bin_dir: bin
//!   diagnostics: diag
//!   runner: run
//! workspace:
//!   max_depth: 6
//!   ignored: [".git", "node_modules", "bin"]
//! ```

use crate::error::ConfigError;
use mingo_editor_core::FormatOptions;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Diagnostics scheduling.
    pub diagnostics: DiagnosticsConfig,
    /// Reformatter settings.
    pub format: FormatConfig,
    /// External oracle binaries.
    pub oracle: OracleConfig,
    /// Workspace browser settings.
    pub workspace: WorkspaceConfig,
}

impl EditorConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(yaml) => Self::from_yaml_str(&yaml),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Diagnostics scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Quiet period after the last edit before the oracle is queried.
    pub debounce_ms: u64,
}

impl DiagnosticsConfig {
    /// The quiet period as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

/// Reformatter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces per indent level.
    pub indent_width: usize,
    /// Spaces a tab expands to.
    pub tab_width: usize,
}

impl FormatConfig {
    /// Convert into core formatter options.
    pub fn options(&self) -> FormatOptions {
        FormatOptions {
            indent_width: self.indent_width,
            tab_width: self.tab_width,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        let options = FormatOptions::default();
        Self {
            indent_width: options.indent_width,
            tab_width: options.tab_width,
        }
    }
}

/// Locations of the external oracle executables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Directory holding the binaries, relative to the workspace root unless absolute.
    pub bin_dir: PathBuf,
    /// Diagnostics oracle executable name.
    pub diagnostics: String,
    /// Execution oracle executable name.
    pub runner: String,
}

impl OracleConfig {
    /// Full path of the diagnostics oracle under `root`.
    pub fn diagnostics_path(&self, root: &Path) -> PathBuf {
        self.binary_path(root, &self.diagnostics)
    }

    /// Full path of the execution oracle under `root`.
    pub fn runner_path(&self, root: &Path) -> PathBuf {
        self.binary_path(root, &self.runner)
    }

    fn binary_path(&self, root: &Path, name: &str) -> PathBuf {
        root.join(&self.bin_dir)
            .join(format!("{name}{}", std::env::consts::EXE_SUFFIX))
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("bin"),
            diagnostics: "diag".to_string(),
            runner: "run".to_string(),
        }
    }
}

/// Workspace browser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Maximum directory depth walked below the root.
    pub max_depth: usize,
    /// Entry names never listed. Dotfiles are always hidden.
    pub ignored: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            ignored: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "bin".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EditorConfig::from_yaml_str("diagnostics:\n  debounce_ms: 100\n").unwrap();
        assert_eq!(config.diagnostics.debounce(), Duration::from_millis(100));
        assert_eq!(config.format, FormatConfig::default());
        assert_eq!(config.workspace.max_depth, 6);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EditorConfig::from_yaml_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(matches!(
            EditorConfig::from_yaml_str("diagnostics: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_binary_paths() {
        let config = OracleConfig::default();
        let path = config.diagnostics_path(Path::new("/repo"));
        assert_eq!(
            path,
            Path::new("/repo/bin").join(format!("diag{}", std::env::consts::EXE_SUFFIX))
        );
    }
}
