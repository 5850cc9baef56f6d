//! File tree component: draws rendered rows and maps screen cells back to them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::input::Hit;
use crate::app::render::{RenderedView, Row, RowKind};
use crate::infra::config::Glyphs;

/// Where the rows ended up on screen during the last draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeLayout {
    /// Inner area holding one row per line.
    pub rows: Rect,
    /// Index of the first row drawn at the top of `rows`.
    pub offset: usize,
}

impl TreeLayout {
    /// Row index under the screen cell, if any.
    pub fn row_at(&self, column: u16, row: u16, row_count: usize) -> Option<usize> {
        let inside = column >= self.rows.x
            && column < self.rows.right()
            && row >= self.rows.y
            && row < self.rows.bottom();
        if !inside {
            return None;
        }
        let index = self.offset + usize::from(row - self.rows.y);
        (index < row_count).then_some(index)
    }

    /// Screen cell of the first character of a row's name, if that row is on screen.
    pub fn name_cell(&self, index: usize, depth: usize) -> Option<(u16, u16)> {
        let line = index.checked_sub(self.offset)?;
        let y = self.rows.y.checked_add(u16::try_from(line).ok()?)?;
        if y >= self.rows.bottom() {
            return None;
        }
        let indent = u16::try_from(depth * 2 + 2).unwrap_or(u16::MAX);
        Some((self.rows.x.saturating_add(indent), y))
    }

    /// Resolve what a press at the screen cell lands on.
    pub fn hit(&self, view: &RenderedView<'_>, column: u16, row: u16) -> Hit {
        match self.row_at(column, row, view.rows.len()).map(|index| &view.rows[index]) {
            Some(entry) if entry.is_folder() => Hit::Folder(entry.path.clone()),
            Some(entry) => Hit::File(entry.path.clone()),
            None => Hit::Nothing,
        }
    }
}

/// Ratatui component responsible for rendering the file tree view.
#[derive(Debug, Default)]
pub struct FileTree;

impl FileTree {
    /// Draw the tree into `area`, highlighting the keyboard cursor row.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        view: &RenderedView<'_>,
        glyphs: &Glyphs,
        cursor: Option<usize>,
    ) -> TreeLayout {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Explorer · {}", view.title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if view.rows.is_empty() {
            let placeholder = Paragraph::new("Empty folder").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(placeholder, inner);
            return TreeLayout {
                rows: inner,
                offset: 0,
            };
        }

        let items: Vec<ListItem> = view
            .rows
            .iter()
            .map(|row| ListItem::new(row_line(row, glyphs)))
            .collect();

        let mut list_state = ListState::default();
        list_state.select(cursor.filter(|index| *index < view.rows.len()));

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 40, 40))
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(list, inner, &mut list_state);

        TreeLayout {
            rows: inner,
            offset: list_state.offset(),
        }
    }
}

fn row_line<'a>(row: &Row<'a>, glyphs: &Glyphs) -> Line<'a> {
    let mut spans = vec![Span::raw("  ".repeat(row.depth))];
    match row.kind {
        RowKind::Folder { open } => {
            let glyph = if open {
                &glyphs.folder_open
            } else {
                &glyphs.folder_closed
            };
            spans.push(Span::styled(
                format!("{glyph} "),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(
                row.name,
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        RowKind::File { selected: false } => {
            spans.push(Span::styled(
                format!("{} ", glyphs.file),
                Style::default().fg(Color::Gray),
            ));
            spans.push(Span::raw(row.name));
        }
        RowKind::File { selected: true } => {
            let style = Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            spans.push(Span::styled(format!("{} ", glyphs.file), style));
            spans.push(Span::styled(row.name, style));
            spans.push(Span::styled(
                format!(" {}", glyphs.selected),
                Style::default().fg(Color::Cyan),
            ));
        }
    }
    Line::from(spans)
}
