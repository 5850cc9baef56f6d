//! Floating context menu drawn at the cell it was opened from.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};

use crate::app::command::FileOperation;
use crate::app::render::MenuView;

const MENU_WIDTH: u16 = 14;

/// Full menu rectangle anchored at its stored position. It is not moved to fit the screen.
pub fn menu_rect(menu: &MenuView) -> Rect {
    let height = menu.entries.len() as u16 + 2;
    Rect::new(menu.x, menu.y, MENU_WIDTH, height)
}

/// Whether the screen cell lies on the visible part of the menu, border included.
pub fn covers(menu: &MenuView, column: u16, row: u16, screen: Rect) -> bool {
    let area = menu_rect(menu).intersection(screen);
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Menu entry under the screen cell, if the cell lies on one.
pub fn entry_at(menu: &MenuView, column: u16, row: u16) -> Option<FileOperation> {
    let rect = menu_rect(menu);
    let inside_columns = column > rect.x && column < rect.right().saturating_sub(1);
    if !inside_columns || row <= rect.y {
        return None;
    }
    menu.entries.get(usize::from(row - rect.y - 1)).copied()
}

/// Menu overlay component.
#[derive(Debug, Default)]
pub struct ContextMenu;

impl ContextMenu {
    /// Draw the menu clipped to the frame; entries past the screen edge are simply not shown.
    pub fn render(&self, frame: &mut Frame<'_>, menu: &MenuView, highlighted: usize) {
        let area = menu_rect(menu).intersection(frame.size());
        if area.width == 0 || area.height == 0 {
            return;
        }

        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = menu
            .entries
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                let style = if index == highlighted {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        operation.label()[..1].to_string(),
                        style.add_modifier(Modifier::UNDERLINED),
                    ),
                    Span::styled(operation.label()[1..].to_string(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(list, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn menu_at(x: u16, y: u16) -> MenuView {
        MenuView {
            target: "/root/readme.md".into(),
            x,
            y,
            entries: FileOperation::ALL,
        }
    }

    #[test]
    fn entries_sit_inside_the_border() {
        let menu = menu_at(10, 5);
        assert_eq!(entry_at(&menu, 11, 6), Some(FileOperation::Copy));
        assert_eq!(entry_at(&menu, 12, 7), Some(FileOperation::Delete));
        assert_eq!(entry_at(&menu, 22, 8), Some(FileOperation::Rename));
        assert_eq!(entry_at(&menu, 10, 6), None);
        assert_eq!(entry_at(&menu, 11, 5), None);
        assert_eq!(entry_at(&menu, 11, 9), None);
        assert_eq!(entry_at(&menu, 23, 6), None);
    }

    #[test]
    fn border_and_padding_are_covered_but_off_screen_part_is_not() {
        let menu = menu_at(10, 5);
        let screen = Rect::new(0, 0, 20, 8);
        assert!(covers(&menu, 10, 5, screen));
        assert!(covers(&menu, 10, 6, screen));
        assert!(covers(&menu, 19, 7, screen));
        assert!(!covers(&menu, 9, 6, screen));
        assert!(!covers(&menu, 12, 8, screen));
        assert!(!covers(&menu, 21, 6, screen));
    }

    #[test]
    fn menu_keeps_its_position_off_screen() {
        let menu = menu_at(50, 80);
        assert_eq!(menu_rect(&menu), Rect::new(50, 80, MENU_WIDTH, 5));

        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| ContextMenu.render(frame, &menu, 0))
            .unwrap();
    }

    #[test]
    fn partially_visible_menu_draws_clipped() {
        let menu = menu_at(15, 2);
        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| ContextMenu.render(frame, &menu, 1))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (15..20)
            .map(|x| buffer.get(x, 3).symbol().to_string())
            .collect();
        assert_eq!(row, "│Cop│");
    }
}
