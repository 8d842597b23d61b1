use crossterm::event::KeyCode;

use crate::app::{App, AppState};
use crate::command::Command;

use super::helpers;

pub fn handle_input(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        KeyCode::Esc | KeyCode::Backspace => {
            if app.blocks.is_empty() {
                app.should_quit = true;
            } else {
                app.state = AppState::Composing;
            }
            Vec::new()
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.picker_down();
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.picker_up();
            Vec::new()
        }
        KeyCode::Char('r') => {
            let Some((owner, repo)) = helpers::current_repo(app) else {
                return Vec::new();
            };
            vec![Command::FetchPrList { owner, repo }]
        }
        KeyCode::Enter => {
            let Some(pr) = app.selected_pr() else {
                return Vec::new();
            };
            let Some((owner, repo)) = helpers::current_repo(app) else {
                return Vec::new();
            };

            let number = pr.number;
            app.reset_for_new_pr();
            app.current_pr_number = Some(number);
            app.state = AppState::LoadingPr;
            vec![Command::FetchPr {
                owner,
                repo,
                number,
                commits: app.commits.clone(),
            }]
        }
        _ => Vec::new(),
    }
}
