use crossterm::event::KeyCode;

use crate::app::App;
use crate::command::Command;

pub fn handle_input(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.file_down(),
        KeyCode::Char('k') | KeyCode::Up => app.file_up(),
        KeyCode::Char(' ') => app.toggle_file(),
        KeyCode::Char('a') => app.select_all_files(),
        KeyCode::Char('n') => app.select_no_files(),
        KeyCode::Enter => {
            app.confirm_files();
            app.status = app.file_label();
        }
        KeyCode::Esc | KeyCode::Char('q') => app.cancel_files(),
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::config::DEFAULT_MODE;
    use crate::domain::blocks::local_diff_blocks;

    const DIFF: &str = "diff --git a/one b/one\n+1\ndiff --git a/two b/two\n+2\ndiff --git a/three b/three\n+3\n";

    fn picking() -> App {
        let mut app = App::new(DEFAULT_MODE);
        app.load_blocks(None, local_diff_blocks(DIFF, "x.diff"));
        assert!(app.open_file_picker());
        app
    }

    #[test]
    fn none_then_one_file() {
        let mut app = picking();
        handle_input(&mut app, KeyCode::Char('n'));
        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Composing);
        let files = app.selection.selected_files.clone().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files.contains("two"));
        assert_eq!(app.status.as_deref(), Some("1 of 3 files"));
    }

    #[test]
    fn escape_discards_draft() {
        let mut app = picking();
        handle_input(&mut app, KeyCode::Char('n'));
        handle_input(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Composing);
        assert!(app.selection.selected_files.is_none());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = picking();
        for _ in 0..10 {
            handle_input(&mut app, KeyCode::Down);
        }
        assert_eq!(app.file_cursor, 2);
        handle_input(&mut app, KeyCode::Char('a'));
        assert_eq!(app.pending_files.len(), 3);
    }
}
