use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;
use crate::command::Command;

/// Keys while typing instructions; Esc leaves edit mode and keeps the text
pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Vec<Command> {
    match (code, modifiers) {
        (KeyCode::Esc, _) => app.stop_editing(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.clear_text(),
        (KeyCode::Enter, _) => app.insert_char('\n'),
        (KeyCode::Backspace, _) => app.delete_char(),
        (KeyCode::Left, _) => app.cursor_left(),
        (KeyCode::Right, _) => app.cursor_right(),
        (KeyCode::Home, _) => app.cursor_pos = 0,
        (KeyCode::End, _) => app.cursor_pos = app.user_text.chars().count(),
        (KeyCode::Char(c), _) => app.insert_char(c),
        _ => {}
    }
    Vec::new()
}
