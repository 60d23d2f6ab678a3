//! Workspace file collaborator.
//!
//! All paths handed to a [`Workspace`] are relative to its root and `/`-separated. Paths that
//! are absolute or that would climb out of the root are rejected before touching the disk.

use crate::config::WorkspaceConfig;
use crate::error::WorkspaceError;
use mingo_editor_core::{EntryKind, TreeEntry, TreeNode, build_tree};
use mingo_editor_lang::LanguageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directory holding bundled example programs.
pub const EXAMPLES_DIR: &str = "examples";

/// One entry of a workspace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// File name.
    pub name: String,
    /// Root-relative, `/`-separated path.
    pub path: String,
}

impl WorkspaceEntry {
    /// The entry as Tree Builder input.
    pub fn to_tree_entry(&self) -> TreeEntry {
        TreeEntry {
            kind: self.kind,
            path: self.path.clone(),
        }
    }
}

/// A directory tree the editor may browse, read and write.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    max_depth: usize,
    ignored: Vec<String>,
    language: LanguageConfig,
}

impl Workspace {
    /// Workspace at `root` with default listing settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &WorkspaceConfig::default())
    }

    /// Workspace at `root` using `config` for listing depth and ignored names.
    pub fn from_config(root: impl Into<PathBuf>, config: &WorkspaceConfig) -> Self {
        Self {
            root: root.into(),
            max_depth: config.max_depth,
            ignored: config.ignored.clone(),
            language: LanguageConfig::mingo(),
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the workspace, directories before their contents, names sorted.
    ///
    /// Failing to read the root is an error; unreadable subdirectories are listed but not
    /// descended into.
    pub fn list(&self) -> Result<Vec<WorkspaceEntry>, WorkspaceError> {
        let children = sorted_children(&self.root)?;
        let mut entries = Vec::new();
        self.walk_children(&self.root, children, "", self.max_depth, &mut entries);
        debug!(root = %self.root.display(), entries = entries.len(), "workspace listed");
        Ok(entries)
    }

    /// The listing as a nested tree.
    pub fn tree(&self) -> Result<TreeNode, WorkspaceError> {
        let items = self
            .list()?
            .iter()
            .map(WorkspaceEntry::to_tree_entry)
            .collect::<Vec<_>>();
        Ok(build_tree(&items))
    }

    /// Read a file as UTF-8 text.
    pub fn read(&self, rel: &str) -> Result<String, WorkspaceError> {
        let path = self.resolve(rel)?;
        fs::read_to_string(&path).map_err(|source| io_error(path, source))
    }

    /// Write `content` to a file, creating missing parent directories.
    pub fn write(&self, rel: &str, content: &str) -> Result<(), WorkspaceError> {
        let path = self.resolve(rel)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent.to_path_buf(), source))?;
        }
        fs::write(&path, content).map_err(|source| io_error(path.clone(), source))?;
        trace!(path = %path.display(), bytes = content.len(), "file written");
        Ok(())
    }

    /// Source files at the root and in [`EXAMPLES_DIR`], root-relative and sorted.
    pub fn list_examples(&self) -> Result<Vec<String>, WorkspaceError> {
        let mut examples = self.source_files_in("")?;
        examples.extend(self.source_files_in(EXAMPLES_DIR)?);
        Ok(examples)
    }

    /// Load an example by bare file name or by root-relative path.
    ///
    /// A bare name is looked up at the root first, then in [`EXAMPLES_DIR`].
    pub fn load_example(&self, name: &str) -> Result<String, WorkspaceError> {
        let candidates = if name.contains('/') {
            vec![name.to_string()]
        } else {
            vec![name.to_string(), format!("{EXAMPLES_DIR}/{name}")]
        };

        for candidate in &candidates {
            if self.resolve(candidate)?.is_file() {
                return self.read(candidate);
            }
        }
        Err(WorkspaceError::NotFound(name.to_string()))
    }

    /// Map a root-relative path to an absolute one, rejecting anything outside the root.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf, WorkspaceError> {
        let mut parts: Vec<&str> = Vec::new();
        for component in Path::new(rel).components() {
            match component {
                Component::Normal(part) => parts.push(
                    part.to_str()
                        .ok_or_else(|| WorkspaceError::InvalidPath(rel.to_string()))?,
                ),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(WorkspaceError::InvalidPath(rel.to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(WorkspaceError::InvalidPath(rel.to_string()));
                }
            }
        }
        if parts.is_empty() {
            return Err(WorkspaceError::InvalidPath(rel.to_string()));
        }
        Ok(parts.iter().fold(self.root.clone(), |path, part| path.join(part)))
    }

    fn is_listed(&self, name: &str) -> bool {
        !name.starts_with('.') && !self.ignored.iter().any(|ignored| ignored == name)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        prefix: &str,
        remaining: usize,
        out: &mut Vec<WorkspaceEntry>,
    ) {
        match sorted_children(dir) {
            Ok(children) => self.walk_children(dir, children, prefix, remaining, out),
            Err(err) => warn!(%err, "skipping unreadable directory"),
        }
    }

    fn walk_children(
        &self,
        dir: &Path,
        children: Vec<(String, bool)>,
        prefix: &str,
        remaining: usize,
        out: &mut Vec<WorkspaceEntry>,
    ) {
        for (name, is_dir) in children {
            if !self.is_listed(&name) {
                continue;
            }
            let path = join_rel(prefix, &name);
            if is_dir {
                out.push(WorkspaceEntry {
                    kind: EntryKind::Dir,
                    name: name.clone(),
                    path: path.clone(),
                });
                if remaining > 0 {
                    self.walk_dir(&dir.join(&name), &path, remaining - 1, out);
                }
            } else {
                out.push(WorkspaceEntry {
                    kind: EntryKind::File,
                    name,
                    path,
                });
            }
        }
    }

    fn source_files_in(&self, rel_dir: &str) -> Result<Vec<String>, WorkspaceError> {
        let dir = if rel_dir.is_empty() {
            self.root.clone()
        } else {
            self.resolve(rel_dir)?
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(sorted_children(&dir)?
            .into_iter()
            .filter(|(name, is_dir)| !is_dir && self.language.matches_path(name))
            .map(|(name, _)| join_rel(rel_dir, &name))
            .collect())
    }
}

fn sorted_children(dir: &Path) -> Result<Vec<(String, bool)>, WorkspaceError> {
    let read_dir = fs::read_dir(dir).map_err(|source| io_error(dir.to_path_buf(), source))?;
    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| io_error(dir.to_path_buf(), source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| io_error(entry.path(), source))?;
        children.push((
            entry.file_name().to_string_lossy().into_owned(),
            file_type.is_dir(),
        ));
    }
    children.sort();
    Ok(children)
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn io_error(path: PathBuf, source: io::Error) -> WorkspaceError {
    WorkspaceError::Io { path, source }
}
