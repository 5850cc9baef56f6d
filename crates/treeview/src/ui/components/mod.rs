//! Collection of reusable TUI components.

pub mod context_menu;
pub mod file_tree;
