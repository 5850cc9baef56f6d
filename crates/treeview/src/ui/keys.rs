//! Matching configured key binding strings against terminal key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether `binding` (e.g. `"j"`, `"enter"`, `"ctrl+q"`) describes `key`.
///
/// Unknown binding names never match.
pub fn matches(binding: &str, key: &KeyEvent) -> bool {
    let binding = binding.trim().to_ascii_lowercase();
    let (wants_ctrl, name) = match binding.strip_prefix("ctrl+") {
        Some(rest) => (true, rest),
        None => (false, binding.as_str()),
    };
    if wants_ctrl != key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match parse_code(name) {
        Some(KeyCode::Char(expected)) => match key.code {
            KeyCode::Char(actual) => actual.to_ascii_lowercase() == expected,
            _ => false,
        },
        Some(code) => key.code == code,
        None => false,
    }
}

fn parse_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "menu" => KeyCode::Menu,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };
    Some(code)
}
