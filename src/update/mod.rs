mod actions;
mod composing;
mod editing;
mod error;
mod file_picker;
mod helpers;
mod loading;
mod picker;

use crate::action::Action;
use crate::app::{App, AppState};
use crate::command::Command;
use crate::config::AppConfig;

pub fn update(app: &mut App, action: Action, config: &AppConfig) -> Vec<Command> {
    match action {
        Action::Input { code, modifiers } => match &app.state {
            AppState::PrPicker => picker::handle_input(app, code),
            AppState::Composing => composing::handle_input(app, code, modifiers, config),
            AppState::PickingFiles => file_picker::handle_input(app, code),
            AppState::EditingText => editing::handle_input(app, code, modifiers),
            AppState::Error(_) => error::handle_input(app, code),
            AppState::LoadingPrList | AppState::LoadingPr => loading::handle_input(app, code),
        },
        Action::PrListLoaded(result) => actions::handle_pr_list_loaded(app, result),
        Action::PrLoaded(result) => actions::handle_pr_loaded(app, result),
        Action::Copied { label, result } => actions::handle_copied(app, label, result),
        Action::Launched(result) => actions::handle_launched(app, result),
    }
}
