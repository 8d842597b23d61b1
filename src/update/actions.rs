use crate::app::{App, AppState};
use crate::command::Command;
use crate::domain::blocks::build_blocks;
use crate::domain::types::{PrBundle, PrListItem};

pub fn handle_pr_list_loaded(app: &mut App, result: Result<Vec<PrListItem>, String>) -> Vec<Command> {
    match result {
        Ok(pr_list) => {
            app.pr_list = pr_list;
            app.picker_selected = 0;
            app.state = AppState::PrPicker;
        }
        Err(err) => {
            app.state = AppState::Error(format!("Failed to fetch PR list: {}", err));
        }
    }
    Vec::new()
}

pub fn handle_pr_loaded(app: &mut App, result: Result<PrBundle, String>) -> Vec<Command> {
    match result {
        Ok(bundle) => {
            let pr = bundle.pr.clone();
            app.current_repo = Some((pr.owner.clone(), pr.repo.clone()));
            app.current_pr_number = Some(pr.number);
            let blocks = build_blocks(&bundle);
            tracing::info!(pr = pr.number, blocks = blocks.len(), "composer ready");
            app.load_blocks(Some(pr), blocks);
        }
        Err(err) => {
            app.state = AppState::Error(err);
        }
    }
    Vec::new()
}

pub fn handle_copied(app: &mut App, label: String, result: Result<(), String>) -> Vec<Command> {
    app.status = Some(match result {
        Ok(()) => format!("Copied {} to clipboard", label),
        Err(err) => {
            tracing::warn!(error = %err, "clipboard copy failed");
            format!("Error: {}", err)
        }
    });
    Vec::new()
}

pub fn handle_launched(app: &mut App, result: Result<(), String>) -> Vec<Command> {
    app.status = Some(match result {
        Ok(()) => "Opened in RepoPrompt".to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "RepoPrompt launch failed");
            format!("Error: {}", err)
        }
    });
    Vec::new()
}
