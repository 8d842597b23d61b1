mod action;
mod app;
mod command;
mod ui;
mod update;

use rpcompose::{config, domain};

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use action::Action;
use app::{App, AppState};
use command::{execute_command, Command};
use config::{AppConfig, DEFAULT_LOG_FILE, DEFAULT_MODE};
use domain::{blocks, github};

#[derive(Parser)]
#[command(name = "rpcompose")]
#[command(about = "Compose RepoPrompt prompts from PR diffs and review threads")]
struct Cli {
    /// PR reference: owner/repo#123, a GitHub URL, or owner/repo to pick a PR
    pr_ref: Option<String>,

    /// Repo for PR picker (owner/repo format)
    #[arg(short = 'R', long)]
    repo: Option<String>,

    /// Template mode
    #[arg(short, long, env = "RPCOMPOSE_MODE", default_value = DEFAULT_MODE)]
    mode: String,

    /// Instructions appended after the attached sections
    #[arg(short = 't', long = "text", default_value = "")]
    text: String,

    /// Compose from a diff on disk instead of a PR
    #[arg(long)]
    diff_file: Option<PathBuf>,

    /// Extra commit to attach as its own diff section (repeatable)
    #[arg(long = "commit")]
    commits: Vec<String>,

    /// TOML file with template overrides
    #[arg(long, env = "RPCOMPOSE_TEMPLATES")]
    templates: Option<PathBuf>,

    /// Print the prompt with the default selection and exit
    #[arg(long)]
    print: bool,

    /// Path to log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: String,
}

/// Startup mode determined from CLI args
enum StartupMode {
    /// Compose from a local diff file
    LocalDiff(PathBuf),
    /// Start with PR picker for a specific repo
    PrPicker { owner: String, repo: String },
    /// Load a specific PR directly
    DirectPr { owner: String, repo: String, number: u32 },
}

fn startup_mode(cli: &Cli) -> Result<StartupMode> {
    if let Some(path) = &cli.diff_file {
        return Ok(StartupMode::LocalDiff(path.clone()));
    }

    if let Some(pr_ref) = &cli.pr_ref {
        if pr_ref.contains('#') || pr_ref.contains("github.com") {
            let (owner, repo, number) =
                github::parse_pr_reference(pr_ref).context("Invalid PR reference")?;
            return Ok(StartupMode::DirectPr { owner, repo, number });
        }
        let (owner, repo) = github::parse_repo_spec(pr_ref)?;
        return Ok(StartupMode::PrPicker { owner, repo });
    }

    if let Some(repo_spec) = &cli.repo {
        let (owner, repo) = github::parse_repo_spec(repo_spec)?;
        return Ok(StartupMode::PrPicker { owner, repo });
    }

    anyhow::bail!("Nothing to compose from. Pass a PR reference, --repo owner/repo or --diff-file PATH")
}

fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    Ok(())
}

fn load_local_diff(app: &mut App, path: &Path) -> Result<()> {
    let diff = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read diff file {}", path.display()))?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    tracing::info!(path = %path.display(), bytes = diff.len(), "loaded local diff");
    app.load_blocks(None, blocks::local_diff_blocks(&diff, &label));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = AppConfig::load(&cli.mode, cli.templates.as_deref(), &cli.log_file)?;
    let startup = startup_mode(&cli)?;

    if cli.print {
        return print_prompt(&cli, &config, startup).await;
    }

    let mut app = App::new(&config.mode);
    app.user_text = cli.text.clone();
    app.commits = cli.commits.clone();

    let initial = match startup {
        StartupMode::LocalDiff(path) => {
            load_local_diff(&mut app, &path)?;
            Vec::new()
        }
        StartupMode::PrPicker { owner, repo } => {
            app = App::new_with_picker(&owner, &repo, &config.mode);
            app.user_text = cli.text.clone();
            app.commits = cli.commits.clone();
            vec![Command::FetchPrList { owner, repo }]
        }
        StartupMode::DirectPr { owner, repo, number } => {
            app.current_repo = Some((owner.clone(), repo.clone()));
            app.current_pr_number = Some(number);
            app.state = AppState::LoadingPr;
            vec![Command::FetchPr {
                owner,
                repo,
                number,
                commits: cli.commits.clone(),
            }]
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &config, initial).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn print_prompt(cli: &Cli, config: &AppConfig, startup: StartupMode) -> Result<()> {
    let mut app = App::new(&config.mode);
    app.user_text = cli.text.clone();

    match startup {
        StartupMode::LocalDiff(path) => load_local_diff(&mut app, &path)?,
        StartupMode::DirectPr { owner, repo, number } => {
            let bundle = github::fetch_pr(&owner, &repo, number, &cli.commits).await?;
            app.load_blocks(Some(bundle.pr.clone()), blocks::build_blocks(&bundle));
        }
        StartupMode::PrPicker { .. } => {
            anyhow::bail!("--print needs a PR reference with a number or --diff-file")
        }
    }

    if app.nothing_to_send(config) {
        anyhow::bail!("Nothing to send");
    }

    let prompt = app.assembled_prompt(config);
    tracing::debug!(bytes = prompt.len(), mode = %app.mode, "printing prompt");
    println!("{}", prompt);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
    initial: Vec<Command>,
) -> Result<()> {
    let mut pending = initial;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Run queued commands before reading more input so loading screens get drawn
        if !pending.is_empty() {
            for command in std::mem::take(&mut pending) {
                if let Some(action) = execute_command(command, config).await {
                    pending.extend(update::update(app, action, config));
                }
            }
            continue;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = Action::Input {
                code: key.code,
                modifiers: key.modifiers,
            };
            pending = update::update(app, action, config);
        }
    }

    Ok(())
}
