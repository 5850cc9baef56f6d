//! Application loop for the TUI.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::app::command::FileOperation;
use crate::app::input::{Button, Hit, Pointer, apply_pointer};
use crate::app::render::{RowKind, render};
use crate::app::state::InteractionState;
use crate::domain::model::TreeModel;
use crate::infra::config::Config;
use crate::ui::components::context_menu::{self, ContextMenu};
use crate::ui::components::file_tree::{FileTree, TreeLayout};
use crate::ui::keys;
use crate::ui::sink::{HostSink, StatusLevel};

const TICK_RATE: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Primary entry point for running the interactive TUI.
pub struct UiApp {
    config: Config,
    tree: TreeModel,
    state: InteractionState,
    sink: HostSink,
    file_tree: FileTree,
    context_menu: ContextMenu,
    layout: TreeLayout,
    screen: Rect,
    cursor: usize,
    menu_cursor: usize,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(config: Config, tree: TreeModel) -> Self {
        let sink = HostSink::new(&config.clipboard);
        Self {
            config,
            tree,
            state: InteractionState::new(),
            sink,
            file_tree: FileTree,
            context_menu: ContextMenu,
            layout: TreeLayout::default(),
            screen: Rect::default(),
            cursor: 0,
            menu_cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        tracing::info!(root = self.tree.root().name(), "tree view started");
        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev);
            }
        }
        tracing::info!("tree view closed");
        Ok(())
    }

    /// Render the current state. Rows are recomputed from the model on every call.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        self.screen = size;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let view = render(&self.tree, &self.state);
        if !view.rows.is_empty() {
            self.cursor = self.cursor.min(view.rows.len() - 1);
        }
        self.layout = self.file_tree.render(
            frame,
            chunks[0],
            &view,
            &self.config.glyphs,
            Some(self.cursor),
        );

        self.render_hints(frame, chunks[1]);
        self.render_status(frame, chunks[2]);

        if let Some(menu) = &view.menu {
            self.context_menu.render(frame, menu, self.menu_cursor);
        }
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let bindings = &self.config.keybindings;
        let hints = Paragraph::new(Line::from(vec![
            key_span(format!("{}/{}", bindings.down, bindings.up)),
            Span::raw(" move · "),
            key_span(bindings.activate.clone()),
            Span::raw(" open/select · "),
            key_span(bindings.menu.clone()),
            Span::raw(" menu · "),
            key_span("right-click".to_string()),
            Span::raw(" menu · "),
            key_span(bindings.quit.clone()),
            Span::raw(" quit"),
        ]))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, area);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = match &self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Info => Style::default().fg(Color::Gray),
                    StatusLevel::Success => Style::default().fg(Color::Green),
                    StatusLevel::Error => Style::default().fg(Color::Red),
                };
                Line::styled(status.text.clone(), style)
            }
            None => {
                let text = self
                    .state
                    .selected()
                    .map(|path| format!("Selected {path}"))
                    .unwrap_or_else(|| "Ready".to_string());
                Line::styled(text, Style::default().fg(Color::DarkGray))
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let button = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Button::Primary,
            MouseEventKind::Down(MouseButton::Right) => Button::Secondary,
            MouseEventKind::Down(MouseButton::Middle) => {
                self.state.dismiss_context_menu();
                return;
            }
            MouseEventKind::ScrollDown => {
                self.move_cursor(1);
                return;
            }
            MouseEventKind::ScrollUp => {
                self.move_cursor(-1);
                return;
            }
            _ => return,
        };

        let view = render(&self.tree, &self.state);
        let on_menu = view.menu.as_ref().is_some_and(|menu| {
            context_menu::covers(menu, mouse.column, mouse.row, self.screen)
        });
        let hit = match view.menu.as_ref() {
            Some(menu) if on_menu => context_menu::entry_at(menu, mouse.column, mouse.row)
                .map_or(Hit::Nothing, Hit::MenuEntry),
            _ => self.layout.hit(&view, mouse.column, mouse.row),
        };
        if !on_menu
            && let Some(index) = self.layout.row_at(mouse.column, mouse.row, view.rows.len())
        {
            self.cursor = index;
        }

        let pointer = Pointer {
            button,
            x: mouse.column,
            y: mouse.row,
            hit,
        };
        apply_pointer(&mut self.state, pointer, &mut self.sink);
        self.menu_cursor = 0;
        self.collect_outcome();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if self.state.context_menu().is_some() {
            self.handle_menu_key(key);
        } else {
            self.handle_tree_key(key);
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) {
        let bindings = self.config.keybindings.clone();
        if keys::matches(&bindings.quit, &key) || key.code == KeyCode::Esc {
            self.should_quit = true;
        } else if keys::matches(&bindings.down, &key) || key.code == KeyCode::Down {
            self.move_cursor(1);
        } else if keys::matches(&bindings.up, &key) || key.code == KeyCode::Up {
            self.move_cursor(-1);
        } else if keys::matches(&bindings.activate, &key) || key.code == KeyCode::Char(' ') {
            self.activate_cursor();
        } else if keys::matches(&bindings.menu, &key) || key.code == KeyCode::Menu {
            self.open_menu_at_cursor();
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let bindings = self.config.keybindings.clone();
        let entries = FileOperation::ALL;
        let chosen = match key.code {
            KeyCode::Esc => {
                self.state.dismiss_context_menu();
                return;
            }
            KeyCode::Char('c') => Some(FileOperation::Copy),
            KeyCode::Char('d') => Some(FileOperation::Delete),
            KeyCode::Char('r') => Some(FileOperation::Rename),
            KeyCode::Enter => entries.get(self.menu_cursor).copied(),
            KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1) % entries.len();
                None
            }
            KeyCode::Up => {
                self.menu_cursor = (self.menu_cursor + entries.len() - 1) % entries.len();
                None
            }
            _ if keys::matches(&bindings.down, &key) => {
                self.menu_cursor = (self.menu_cursor + 1) % entries.len();
                None
            }
            _ if keys::matches(&bindings.up, &key) => {
                self.menu_cursor = (self.menu_cursor + entries.len() - 1) % entries.len();
                None
            }
            _ => None,
        };

        if let Some(operation) = chosen {
            self.dispatch(operation);
        }
    }

    fn dispatch(&mut self, operation: FileOperation) {
        let Some(target) = self.state.context_menu().map(|menu| menu.target.clone()) else {
            return;
        };
        self.state
            .dispatch_command(operation, &target, &mut self.sink);
        self.menu_cursor = 0;
        self.collect_outcome();
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = render(&self.tree, &self.state).rows.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn activate_cursor(&mut self) {
        let view = render(&self.tree, &self.state);
        let Some(row) = view.rows.get(self.cursor) else {
            return;
        };
        let path = row.path.clone();
        match row.kind {
            RowKind::Folder { .. } => self.state.toggle_folder(&path),
            RowKind::File { .. } => self.state.select_file(&path),
        }
    }

    fn open_menu_at_cursor(&mut self) {
        let view = render(&self.tree, &self.state);
        let Some(row) = view.rows.get(self.cursor) else {
            return;
        };
        if row.is_folder() {
            return;
        }
        if let Some((x, y)) = self.layout.name_cell(self.cursor, row.depth) {
            let path = row.path.clone();
            self.state.open_context_menu(&path, x, y);
            self.menu_cursor = 0;
        }
    }

    fn collect_outcome(&mut self) {
        if let Some(outcome) = self.sink.take_outcome() {
            self.set_status(outcome.level, outcome.text);
        }
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

fn key_span(label: String) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Cyan))
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + STATUS_TTL,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    use crate::domain::model::Node;

    fn app() -> UiApp {
        let tree = TreeModel::new(Node::folder(
            "root",
            vec![
                Node::folder("src", vec![Node::file("a.ts")]),
                Node::file("readme.md"),
            ],
        ))
        .unwrap();
        let mut config = Config::default();
        config.clipboard.copy_paths = false;
        UiApp::new(config, tree)
    }

    fn draw(app: &mut UiApp, terminal: &mut Terminal<TestBackend>) -> String {
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn click(button: MouseButton, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn mouse_walkthrough_toggles_selects_and_dispatches() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        draw(&mut app, &mut terminal);

        // rows start at (1, 1): "src", then "readme.md"
        app.handle_event(click(MouseButton::Left, 3, 1));
        assert!(app.state().is_expanded("/root/src"));
        let screen = draw(&mut app, &mut terminal);
        assert!(screen.contains("• a.ts"));

        app.handle_event(click(MouseButton::Left, 5, 2));
        assert!(app.state().is_selected("/root/src/a.ts"));

        app.handle_event(click(MouseButton::Right, 10, 3));
        let menu = app.state().context_menu().unwrap();
        assert_eq!((menu.target.as_str(), menu.x, menu.y), ("/root/readme.md", 10, 3));
        let screen = draw(&mut app, &mut terminal);
        assert!(screen.contains("Delete"));

        // second entry sits two rows below the menu's top border
        app.handle_event(click(MouseButton::Left, 12, 5));
        assert!(app.state().context_menu().is_none());
        assert!(app.state().is_selected("/root/src/a.ts"));
        let screen = draw(&mut app, &mut terminal);
        assert!(screen.contains("Delete of /root/readme.md not performed"));
    }

    #[test]
    fn click_elsewhere_dismisses_menu() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        draw(&mut app, &mut terminal);

        app.handle_event(click(MouseButton::Right, 5, 2));
        assert!(app.state().context_menu().is_some());
        app.handle_event(click(MouseButton::Left, 50, 12));
        assert!(app.state().context_menu().is_none());
    }

    #[test]
    fn click_on_menu_border_only_dismisses() {
        let tree = TreeModel::new(Node::folder(
            "root",
            vec![
                Node::file("a.txt"),
                Node::folder("hidden", vec![Node::file("inner.txt")]),
                Node::file("b.txt"),
            ],
        ))
        .unwrap();
        let mut config = Config::default();
        config.clipboard.copy_paths = false;
        let mut app = UiApp::new(config, tree);
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        draw(&mut app, &mut terminal);

        app.handle_event(click(MouseButton::Right, 4, 1));
        draw(&mut app, &mut terminal);
        // left border, drawn over the "hidden" row
        app.handle_event(click(MouseButton::Left, 4, 2));
        assert!(app.state().context_menu().is_none());
        assert!(!app.state().is_expanded("/root/hidden"));
        assert_eq!(app.cursor, 0);

        app.handle_event(click(MouseButton::Right, 4, 1));
        draw(&mut app, &mut terminal);
        // right border, drawn over the "b.txt" row
        app.handle_event(click(MouseButton::Left, 17, 3));
        assert!(app.state().context_menu().is_none());
        assert!(app.state().selected().is_none());

        app.handle_event(click(MouseButton::Right, 4, 1));
        draw(&mut app, &mut terminal);
        // top border over "a.txt"
        app.handle_event(click(MouseButton::Left, 8, 1));
        assert!(app.state().context_menu().is_none());
        assert!(app.state().selected().is_none());
    }

    #[test]
    fn keyboard_navigation_drives_the_same_transitions() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        draw(&mut app, &mut terminal);

        app.handle_event(press(KeyCode::Enter));
        assert!(app.state().is_expanded("/root/src"));
        draw(&mut app, &mut terminal);

        app.handle_event(press(KeyCode::Char('j')));
        app.handle_event(press(KeyCode::Char(' ')));
        assert!(app.state().is_selected("/root/src/a.ts"));

        app.handle_event(press(KeyCode::Char('m')));
        let menu = app.state().context_menu().unwrap();
        assert_eq!((menu.x, menu.y), (5, 2));

        app.handle_event(press(KeyCode::Char('r')));
        assert!(app.state().context_menu().is_none());

        app.handle_event(press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn escape_closes_menu_before_quitting() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        draw(&mut app, &mut terminal);

        app.handle_event(click(MouseButton::Right, 5, 2));
        app.handle_event(press(KeyCode::Esc));
        assert!(app.state().context_menu().is_none());
        assert!(!app.should_quit());
    }
}
