use crate::action::Action;
use crate::config::AppConfig;
use crate::domain::{github, launch};

pub enum Command {
    FetchPrList { owner: String, repo: String },
    FetchPr {
        owner: String,
        repo: String,
        number: u32,
        commits: Vec<String>,
    },
    CopyToClipboard { text: String, label: String },
    OpenRepoPrompt { prompt: String },
}

pub async fn execute_command(command: Command, config: &AppConfig) -> Option<Action> {
    match command {
        Command::FetchPrList { owner, repo } => {
            let result = github::fetch_pr_list(&owner, &repo)
                .await
                .map_err(|e| e.to_string());
            Some(Action::PrListLoaded(result))
        }
        Command::FetchPr {
            owner,
            repo,
            number,
            commits,
        } => {
            let result = github::fetch_pr(&owner, &repo, number, &commits)
                .await
                .map_err(|e| e.to_string());
            Some(Action::PrLoaded(result))
        }
        Command::CopyToClipboard { text, label } => {
            let result = launch::copy_to_clipboard(&text).map_err(|e| e.to_string());
            Some(Action::Copied { label, result })
        }
        Command::OpenRepoPrompt { prompt } => {
            let result = match launch::deep_link(&config.launch_url, &prompt) {
                Ok(url) => launch::open_deep_link(&url).await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            Some(Action::Launched(result))
        }
    }
}
