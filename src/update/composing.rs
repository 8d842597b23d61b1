use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::{App, AppState};
use crate::command::Command;
use crate::config::AppConfig;

use super::helpers;

pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers, config: &AppConfig) -> Vec<Command> {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) => {
            app.should_quit = true;
            Vec::new()
        }
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            app.cursor_down();
            Vec::new()
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            app.cursor_up();
            Vec::new()
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            app.scroll_offset = app.scroll_offset.saturating_add(20);
            Vec::new()
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
            app.scroll_offset = app.scroll_offset.saturating_sub(20);
            Vec::new()
        }
        (KeyCode::Char(' '), _) => {
            app.toggle_current();
            Vec::new()
        }
        (KeyCode::Enter, _) => {
            if !app.open_file_picker() {
                app.toggle_collapsed_current();
            }
            Vec::new()
        }
        (KeyCode::Char('z'), _) => {
            app.toggle_collapsed_current();
            Vec::new()
        }
        (KeyCode::Char('m'), _) => {
            app.cycle_mode(config);
            app.status = Some(format!("Mode: {}", app.mode));
            Vec::new()
        }
        (KeyCode::Char('i'), _) => {
            app.start_editing();
            Vec::new()
        }
        (KeyCode::Char('r'), _) => {
            app.reset_selection();
            app.status = Some("Selection reset".to_string());
            Vec::new()
        }
        (KeyCode::Char('y'), _) => {
            if helpers::refuse_empty(app, config) {
                return Vec::new();
            }
            let text = app.assembled_prompt(config);
            tracing::debug!(bytes = text.len(), mode = %app.mode, "prompt assembled");
            vec![Command::CopyToClipboard {
                text,
                label: "prompt".to_string(),
            }]
        }
        (KeyCode::Char('Y'), _) => {
            let Some(text) = app.current_section_text() else {
                return Vec::new();
            };
            vec![Command::CopyToClipboard {
                text,
                label: "section".to_string(),
            }]
        }
        (KeyCode::Char('o'), _) => {
            if helpers::refuse_empty(app, config) {
                return Vec::new();
            }
            app.status = Some("Opening RepoPrompt...".to_string());
            vec![Command::OpenRepoPrompt {
                prompt: app.assembled_prompt(config),
            }]
        }
        (KeyCode::Char('p'), _) => {
            let Some((owner, repo)) = helpers::current_repo(app) else {
                app.status = Some("No repository to pick from".to_string());
                return Vec::new();
            };
            app.state = AppState::LoadingPrList;
            vec![Command::FetchPrList { owner, repo }]
        }
        _ => Vec::new(),
    }
}
