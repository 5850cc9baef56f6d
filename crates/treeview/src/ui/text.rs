//! Plain-text rendering of a view, used by `--print` and snapshot tests.

use std::fmt::Write as _;

use crate::app::render::{RenderedView, RowKind};
use crate::infra::config::Glyphs;

/// Title line, then one line per row indented two spaces per level, then the menu if open.
pub fn to_text(view: &RenderedView<'_>, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    out.push_str(view.title);
    for row in &view.rows {
        out.push('\n');
        out.push_str(&"  ".repeat(row.depth));
        match row.kind {
            RowKind::Folder { open } => {
                let glyph = if open {
                    &glyphs.folder_open
                } else {
                    &glyphs.folder_closed
                };
                let _ = write!(out, "{glyph} {}", row.name);
            }
            RowKind::File { selected } => {
                let _ = write!(out, "{} {}", glyphs.file, row.name);
                if selected {
                    let _ = write!(out, " {}", glyphs.selected);
                }
            }
        }
    }
    if let Some(menu) = &view.menu {
        let labels: Vec<&str> = menu.entries.iter().map(|op| op.label()).collect();
        let _ = write!(
            out,
            "\n[menu at ({}, {}) for {}] {}",
            menu.x,
            menu.y,
            menu.target,
            labels.join(" | ")
        );
    }
    out
}
