//! Translation of pointer input into interaction-state transitions.

use crate::app::command::{CommandSink, FileOperation};
use crate::app::state::InteractionState;
use crate::domain::model::NodePath;

/// Which pointer button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// What lies under the pointer, as resolved by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Folder(NodePath),
    File(NodePath),
    MenuEntry(FileOperation),
    Nothing,
}

/// A press at screen cell (`x`, `y`) over `hit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    pub button: Button,
    pub x: u16,
    pub y: u16,
    pub hit: Hit,
}

/// Apply one pointer press to `state`.
///
/// A secondary press on a file opens the menu there. Every other press dismisses an open menu,
/// then a primary press toggles a folder, selects a file, or runs a menu entry against the menu
/// target.
pub fn apply_pointer<S>(state: &mut InteractionState, pointer: Pointer, sink: &mut S)
where
    S: CommandSink + ?Sized,
{
    match (pointer.button, pointer.hit) {
        (Button::Secondary, Hit::File(path)) => {
            state.open_context_menu(&path, pointer.x, pointer.y);
        }
        (Button::Primary, Hit::MenuEntry(operation)) => {
            match state.context_menu().map(|menu| menu.target.clone()) {
                Some(target) => state.dispatch_command(operation, &target, sink),
                None => state.dismiss_context_menu(),
            }
        }
        (Button::Primary, Hit::File(path)) => state.select_file(&path),
        (Button::Primary, Hit::Folder(path)) => {
            state.dismiss_context_menu();
            state.toggle_folder(&path);
        }
        _ => state.dismiss_context_menu(),
    }
}
