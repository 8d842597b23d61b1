use crate::app::App;
use crate::config::AppConfig;

pub fn current_repo(app: &App) -> Option<(String, String)> {
    if let Some((owner, repo)) = &app.current_repo {
        return Some((owner.clone(), repo.clone()));
    }

    app.pr
        .as_ref()
        .map(|pr| (pr.owner.clone(), pr.repo.clone()))
}

pub fn current_pr_ref(app: &App) -> Option<(String, String, u32)> {
    if let Some(pr) = &app.pr {
        return Some((pr.owner.clone(), pr.repo.clone(), pr.number));
    }

    match (&app.current_repo, app.current_pr_number) {
        (Some((owner, repo)), Some(number)) => Some((owner.clone(), repo.clone(), number)),
        _ => None,
    }
}

/// Sets a status and returns true when the prompt would be empty
pub fn refuse_empty(app: &mut App, config: &AppConfig) -> bool {
    if app.nothing_to_send(config) {
        app.status = Some("Nothing to send".to_string());
        return true;
    }
    false
}
