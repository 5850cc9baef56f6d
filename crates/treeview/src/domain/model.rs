//! Domain models for the folder/file hierarchy and the paths identifying its nodes.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Separator used between path segments unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = "/";

/// A node of the tree: either a folder holding ordered children or a leaf file.
///
/// External input uses a `type` tag (`"folder"` or `"file"`). Folders accept `data` as an alias
/// for `children`, and a missing children field deserializes to an empty folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        name: String,
        #[serde(default, alias = "data")]
        children: Vec<Node>,
    },
    File {
        name: String,
    },
}

impl Node {
    pub fn folder<S: Into<String>>(name: S, children: Vec<Node>) -> Self {
        Node::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn file<S: Into<String>>(name: S) -> Self {
        Node::File { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::File { name } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    /// Children in their original order. Files have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Folder { children, .. } => children.as_slice(),
            Node::File { .. } => &[],
        }
    }
}

/// Identity of a node: the separator-joined names from the root, with a leading separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(String);

impl NodePath {
    /// Path of `name` nested beneath `self`.
    pub fn child(&self, name: &str, separator: &str) -> Self {
        let mut path = String::with_capacity(self.0.len() + separator.len() + name.len());
        path.push_str(&self.0);
        path.push_str(separator);
        path.push_str(name);
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodePath {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodePath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Immutable tree supplied by the host for the lifetime of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeModel {
    root: Node,
    separator: String,
}

impl TreeModel {
    /// Validate `root` and wrap it using the default `/` separator.
    pub fn new(root: Node) -> Result<Self, DomainError> {
        Self::with_separator(root, DEFAULT_SEPARATOR)
    }

    /// Validate `root` and wrap it using a custom path separator.
    pub fn with_separator<S: Into<String>>(root: Node, separator: S) -> Result<Self, DomainError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(DomainError::EmptySeparator);
        }
        if !root.is_folder() {
            return Err(DomainError::RootNotFolder(root.name().to_owned()));
        }
        validate_names(&root, &NodePath::default(), &separator)?;
        Ok(Self { root, separator })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Path of the root folder itself, e.g. `/root`.
    pub fn root_path(&self) -> NodePath {
        NodePath::default().child(self.root.name(), &self.separator)
    }

    /// Depth-first pre-order visit over every node, regardless of expansion.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, &NodePath, usize),
    {
        walk_node(&self.root, &NodePath::default(), 0, &self.separator, &mut visit);
    }

    /// Locate the node whose computed path equals `path`.
    pub fn find(&self, path: &str) -> Option<&Node> {
        let relative = path.strip_prefix(self.separator.as_str())?;
        let mut segments = relative.split(self.separator.as_str());
        if segments.next()? != self.root.name() {
            return None;
        }
        segments.try_fold(&self.root, |node, segment| {
            node.children().iter().find(|child| child.name() == segment)
        })
    }

    /// Paths shared by more than one node, in first-seen order.
    pub fn duplicate_paths(&self) -> Vec<NodePath> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        self.walk(|_, path, _| {
            if !seen.insert(path.clone()) && !duplicates.contains(path) {
                duplicates.push(path.clone());
            }
        });
        duplicates
    }
}

fn walk_node<F>(node: &Node, ancestor: &NodePath, depth: usize, separator: &str, visit: &mut F)
where
    F: FnMut(&Node, &NodePath, usize),
{
    let path = ancestor.child(node.name(), separator);
    visit(node, &path, depth);
    for child in node.children() {
        walk_node(child, &path, depth + 1, separator, visit);
    }
}

fn validate_names(node: &Node, ancestor: &NodePath, separator: &str) -> Result<(), DomainError> {
    let name = node.name();
    if name.is_empty() {
        return Err(DomainError::EmptyName {
            parent: ancestor.to_string(),
        });
    }
    if name.contains(separator) {
        return Err(DomainError::SeparatorInName {
            name: name.to_owned(),
            separator: separator.to_owned(),
        });
    }
    let path = ancestor.child(name, separator);
    node.children()
        .iter()
        .try_for_each(|child| validate_names(child, &path, separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::folder(
            "root",
            vec![
                Node::folder("src", vec![Node::file("a.ts")]),
                Node::file("readme.md"),
            ],
        )
    }

    #[test]
    fn walk_visits_in_pre_order_with_paths() {
        let tree = TreeModel::new(sample()).unwrap();
        let mut visited = Vec::new();
        tree.walk(|_, path, depth| visited.push((path.to_string(), depth)));
        assert_eq!(
            visited,
            vec![
                ("/root".to_string(), 0),
                ("/root/src".to_string(), 1),
                ("/root/src/a.ts".to_string(), 2),
                ("/root/readme.md".to_string(), 1),
            ]
        );
    }

    #[test]
    fn custom_separator_is_used_for_paths() {
        let tree = TreeModel::with_separator(sample(), "::").unwrap();
        assert_eq!(tree.root_path().as_str(), "::root");
        assert_eq!(tree.find("::root::src::a.ts"), Some(&Node::file("a.ts")));
    }

    #[test]
    fn find_resolves_folders_and_files() {
        let tree = TreeModel::new(sample()).unwrap();
        assert!(tree.find("/root/src").unwrap().is_folder());
        assert_eq!(tree.find("/root/readme.md").unwrap().name(), "readme.md");
        assert!(tree.find("/root/missing").is_none());
        assert!(tree.find("/other").is_none());
        assert!(tree.find("root").is_none());
    }

    #[test]
    fn rejects_file_root_and_empty_names() {
        assert_eq!(
            TreeModel::new(Node::file("lonely")),
            Err(DomainError::RootNotFolder("lonely".into()))
        );
        let err = TreeModel::new(Node::folder("root", vec![Node::file("")])).unwrap_err();
        assert_eq!(
            err,
            DomainError::EmptyName {
                parent: "/root".into()
            }
        );
        assert_eq!(
            TreeModel::with_separator(sample(), ""),
            Err(DomainError::EmptySeparator)
        );
    }

    #[test]
    fn rejects_names_containing_separator() {
        let err = TreeModel::new(Node::folder("root", vec![Node::file("a/b")])).unwrap_err();
        assert!(matches!(err, DomainError::SeparatorInName { .. }));
    }

    #[test]
    fn reports_duplicate_paths_once() {
        let root = Node::folder(
            "root",
            vec![Node::file("a"), Node::file("a"), Node::file("a"), Node::file("b")],
        );
        let tree = TreeModel::new(root).unwrap();
        assert_eq!(tree.duplicate_paths(), vec![NodePath::from("/root/a")]);
    }

    #[test]
    fn folder_without_children_deserializes_empty() {
        let node: Node = serde_json::from_str(r#"{"type": "folder", "name": "empty"}"#).unwrap();
        assert_eq!(node, Node::folder("empty", Vec::new()));

        let node: Node = serde_json::from_str(
            r#"{"type": "folder", "name": "legacy", "data": [{"type": "file", "name": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(node.children(), &[Node::file("x")]);
    }
}
