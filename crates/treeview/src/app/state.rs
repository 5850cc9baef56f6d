//! View-local interaction state and the transitions that mutate it.

use std::collections::HashSet;

use crate::app::command::{CommandSink, FileOperation};
use crate::domain::model::NodePath;

/// An open context menu: the file it targets and where it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub target: NodePath,
    pub x: u16,
    pub y: u16,
}

/// Expanded folders, the selected file, and the open context menu of one mounted view.
///
/// Every field starts empty. Nothing here outlives the view that owns it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InteractionState {
    expanded: HashSet<NodePath>,
    selected: Option<NodePath>,
    context_menu: Option<ContextMenu>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a closed folder or close an open one. Applying it twice restores the prior state.
    pub fn toggle_folder(&mut self, path: &NodePath) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.clone());
        }
        tracing::debug!(%path, expanded = self.expanded.contains(path), "folder toggled");
    }

    /// Highlight `path` and dismiss any open context menu.
    pub fn select_file(&mut self, path: &NodePath) {
        self.selected = Some(path.clone());
        self.context_menu = None;
        tracing::debug!(%path, "file selected");
    }

    /// Open the context menu for `path` at the given screen cell, stored as is.
    pub fn open_context_menu(&mut self, path: &NodePath, x: u16, y: u16) {
        self.context_menu = Some(ContextMenu {
            target: path.clone(),
            x,
            y,
        });
        tracing::debug!(%path, x, y, "context menu opened");
    }

    /// Forward `operation` on `target` to `sink`, then close the menu whatever the sink did.
    pub fn dispatch_command<S>(&mut self, operation: FileOperation, target: &NodePath, sink: &mut S)
    where
        S: CommandSink + ?Sized,
    {
        tracing::info!(%operation, %target, "dispatching file operation");
        sink.on_file_operation(operation, target);
        self.context_menu = None;
    }

    pub fn dismiss_context_menu(&mut self) {
        if self.context_menu.take().is_some() {
            tracing::debug!("context menu dismissed");
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.as_ref().is_some_and(|selected| selected.as_str() == path)
    }

    pub fn expanded(&self) -> &HashSet<NodePath> {
        &self.expanded
    }

    pub fn selected(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::app::command::RecordingSink;

    fn path(value: &str) -> NodePath {
        NodePath::from(value)
    }

    #[test]
    fn toggle_twice_restores_expanded() {
        let mut state = InteractionState::new();
        state.toggle_folder(&path("/root/a"));
        let before = state.expanded().clone();

        for candidate in ["/root/a", "/root/b", "/root/unknown/deep"] {
            state.toggle_folder(&path(candidate));
            state.toggle_folder(&path(candidate));
            assert_eq!(state.expanded(), &before);
        }
    }

    #[test]
    fn toggle_leaves_selection_and_menu_alone() {
        let mut state = InteractionState::new();
        state.select_file(&path("/root/f"));
        state.open_context_menu(&path("/root/f"), 3, 4);
        state.toggle_folder(&path("/root/d"));

        assert_eq!(state.selected(), Some(&path("/root/f")));
        assert!(state.context_menu().is_some());
        assert!(state.is_expanded("/root/d"));
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let mut state = InteractionState::new();
        state.select_file(&path("/root/p"));
        state.select_file(&path("/root/q"));
        assert!(state.is_selected("/root/q"));
        assert!(!state.is_selected("/root/p"));

        state.select_file(&path("/root/q"));
        assert_eq!(state.selected(), Some(&path("/root/q")));
    }

    #[test]
    fn selecting_closes_context_menu() {
        let mut state = InteractionState::new();
        state.open_context_menu(&path("/root/p"), 10, 2);
        state.select_file(&path("/root/q"));
        assert!(state.context_menu().is_none());

        state.select_file(&path("/root/q"));
        assert!(state.context_menu().is_none());
    }

    #[test]
    fn opening_menu_keeps_selection_and_expansion() {
        let mut state = InteractionState::new();
        state.toggle_folder(&path("/root/src"));
        state.select_file(&path("/root/src/a.ts"));
        let expanded = state.expanded().clone();

        state.open_context_menu(&path("/root/readme.md"), 50, 80);

        assert_eq!(state.selected(), Some(&path("/root/src/a.ts")));
        assert_eq!(state.expanded(), &expanded);
        assert_eq!(
            state.context_menu(),
            Some(&ContextMenu {
                target: path("/root/readme.md"),
                x: 50,
                y: 80,
            })
        );
    }

    #[test]
    fn dispatch_forwards_and_always_closes_menu() {
        for operation in FileOperation::ALL {
            let mut state = InteractionState::new();
            let mut sink = RecordingSink::new();
            state.open_context_menu(&path("/root/x"), 1, 1);

            state.dispatch_command(operation, &path("/root/x"), &mut sink);

            assert!(state.context_menu().is_none());
            assert_eq!(sink.requests(), &[(operation, path("/root/x"))]);
        }
    }

    #[test]
    fn dispatch_without_open_menu_still_reaches_sink() {
        let mut state = InteractionState::new();
        let mut sink = RecordingSink::new();
        state.dispatch_command(FileOperation::Copy, &path("/root/x"), &mut sink);
        assert_eq!(sink.requests().len(), 1);
        assert!(state.context_menu().is_none());
    }

    #[test]
    fn dismiss_only_clears_menu() {
        let mut state = InteractionState::new();
        state.toggle_folder(&path("/root/d"));
        state.select_file(&path("/root/d/f"));
        state.open_context_menu(&path("/root/d/f"), 0, 0);

        state.dismiss_context_menu();

        assert!(state.context_menu().is_none());
        assert!(state.is_selected("/root/d/f"));
        assert!(state.is_expanded("/root/d"));
    }
}
