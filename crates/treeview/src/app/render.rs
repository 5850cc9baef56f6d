//! Pure projection of the tree and interaction state into visible rows.

use crate::app::command::FileOperation;
use crate::app::state::InteractionState;
use crate::domain::model::{Node, NodePath, TreeModel};

/// What a visible row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Folder { open: bool },
    File { selected: bool },
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub path: NodePath,
    pub name: &'a str,
    pub depth: usize,
    pub kind: RowKind,
}

impl Row<'_> {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RowKind::Folder { .. })
    }
}

/// Floating menu anchored at the coordinates it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub target: NodePath,
    pub x: u16,
    pub y: u16,
    pub entries: [FileOperation; 3],
}

/// Output of [`render`]: a title (the root folder), the visible rows, and the menu if open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView<'a> {
    pub title: &'a str,
    pub rows: Vec<Row<'a>>,
    pub menu: Option<MenuView>,
}

/// Walk the tree depth-first in pre-order and produce the rows a user would see.
///
/// The root folder acts as the container and its children are the top-level rows. Collapsed
/// folders are not descended into, so descendants of a closed folder never show up even when
/// their own paths are marked expanded.
pub fn render<'a>(tree: &'a TreeModel, state: &InteractionState) -> RenderedView<'a> {
    let root = tree.root();
    let root_path = tree.root_path();
    let mut rows = Vec::new();
    for child in root.children() {
        push_rows(child, &root_path, 0, tree.separator(), state, &mut rows);
    }

    let menu = state.context_menu().map(|menu| MenuView {
        target: menu.target.clone(),
        x: menu.x,
        y: menu.y,
        entries: FileOperation::ALL,
    });

    RenderedView {
        title: root.name(),
        rows,
        menu,
    }
}

fn push_rows<'a>(
    node: &'a Node,
    ancestor: &NodePath,
    depth: usize,
    separator: &str,
    state: &InteractionState,
    rows: &mut Vec<Row<'a>>,
) {
    let path = ancestor.child(node.name(), separator);
    match node {
        Node::Folder { name, children } => {
            let open = state.is_expanded(path.as_str());
            rows.push(Row {
                path: path.clone(),
                name,
                depth,
                kind: RowKind::Folder { open },
            });
            if open {
                for child in children {
                    push_rows(child, &path, depth + 1, separator, state, rows);
                }
            }
        }
        Node::File { name } => {
            let selected = state.is_selected(path.as_str());
            rows.push(Row {
                path,
                name,
                depth,
                kind: RowKind::File { selected },
            });
        }
    }
}
