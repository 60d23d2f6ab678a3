//! File-tree builder for the workspace browser.
//!
//! Turns a flat listing of `/`-separated relative paths into nested [`TreeNode`]s. The tree is
//! rebuilt from scratch for every listing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
}

/// One entry of a flat listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// File or directory.
    #[serde(rename = "type", alias = "kind")]
    pub kind: EntryKind,
    /// Relative path, `/`-separated.
    pub path: String,
}

impl TreeEntry {
    /// A file entry.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            path: path.into(),
        }
    }

    /// A directory entry.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Dir,
            path: path.into(),
        }
    }
}

/// A node of the file tree.
///
/// Serializes as JSON `null` for files and as an object for directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Directory: child name to node, sorted by name.
    Dir(BTreeMap<String, TreeNode>),
    /// File leaf.
    File,
}

impl Default for TreeNode {
    fn default() -> Self {
        TreeNode::Dir(BTreeMap::new())
    }
}

impl TreeNode {
    /// Children of a directory node; `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            TreeNode::Dir(children) => Some(children),
            TreeNode::File => None,
        }
    }

    /// Look up a descendant by `/`-separated path.
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        path_segments(path).try_fold(self, |node, name| node.children()?.get(name))
    }

    /// Returns `true` for directory nodes.
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir(_))
    }

    /// Render as an indented listing, directories suffixed with `/`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let TreeNode::Dir(children) = self {
            render_children(children, 0, &mut out);
        }
        out
    }
}

fn render_children(children: &BTreeMap<String, TreeNode>, depth: usize, out: &mut String) {
    for (name, node) in children {
        out.push_str(&"  ".repeat(depth));
        out.push_str(name);
        match node {
            TreeNode::Dir(grandchildren) => {
                out.push_str("/\n");
                render_children(grandchildren, depth + 1, out);
            }
            TreeNode::File => out.push('\n'),
        }
    }
}

fn ensure_dir(node: &mut TreeNode) -> &mut BTreeMap<String, TreeNode> {
    if !node.is_dir() {
        *node = TreeNode::default();
    }
    match node {
        TreeNode::Dir(children) => children,
        TreeNode::File => unreachable!("file node replaced by a directory above"),
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty() && *s != ".")
}

/// Build a tree from a flat listing.
///
/// Entries may arrive in any order: a directory entry never discards children created by an
/// earlier file entry. When the same path is listed with conflicting kinds, the later entry wins.
pub fn build_tree(items: &[TreeEntry]) -> TreeNode {
    let mut root = BTreeMap::<String, TreeNode>::new();

    for item in items {
        let segments = path_segments(&item.path).collect::<Vec<_>>();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let mut current = &mut root;
        for name in parents {
            current = ensure_dir(current.entry((*name).to_string()).or_default());
        }

        match item.kind {
            EntryKind::File => {
                current.insert((*leaf).to_string(), TreeNode::File);
            }
            EntryKind::Dir => {
                ensure_dir(current.entry((*leaf).to_string()).or_default());
            }
        }
    }

    TreeNode::Dir(root)
}
