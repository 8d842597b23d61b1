use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::process::Command;

use super::types::{
    CommitDiff, IssueComment, PrBundle, PrContext, PrListItem, ReviewThread, ThreadComment,
};

const REVIEW_THREADS_QUERY: &str = r#"
query($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviewThreads(first: 100) {
        nodes {
          id
          isResolved
          path
          line
          comments(first: 100) {
            nodes { author { login } body createdAt diffHunk }
          }
        }
      }
    }
  }
}
"#;

/// Response from `gh pr view --json`
#[derive(Debug, Deserialize)]
struct GhPrView {
    number: u32,
    title: String,
    body: Option<String>,
    author: GhAuthor,
    #[serde(rename = "baseRefName")]
    base_ref_name: String,
    #[serde(rename = "headRefName")]
    head_ref_name: String,
    url: String,
    #[serde(default)]
    comments: Vec<GhComment>,
}

#[derive(Debug, Deserialize)]
struct GhAuthor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GhComment {
    id: String,
    // Deleted accounts come back as null
    author: Option<GhAuthor>,
    body: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

/// Response from `gh pr list --json`
#[derive(Debug, Deserialize)]
struct GhPrListItem {
    number: u32,
    title: String,
    author: GhAuthor,
    #[serde(rename = "headRefName")]
    head_ref_name: String,
    #[serde(rename = "isDraft")]
    is_draft: bool,
    additions: u32,
    deletions: u32,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: GraphQlData,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    repository: GraphQlRepository,
}

#[derive(Debug, Deserialize)]
struct GraphQlRepository {
    #[serde(rename = "pullRequest")]
    pull_request: GraphQlPullRequest,
}

#[derive(Debug, Deserialize)]
struct GraphQlPullRequest {
    #[serde(rename = "reviewThreads")]
    review_threads: Nodes<GhThread>,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GhThread {
    id: String,
    #[serde(rename = "isResolved")]
    is_resolved: bool,
    path: Option<String>,
    line: Option<u32>,
    comments: Nodes<GhThreadComment>,
}

#[derive(Debug, Deserialize)]
struct GhThreadComment {
    author: Option<GhAuthor>,
    body: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "diffHunk")]
    diff_hunk: Option<String>,
}

fn login(author: Option<GhAuthor>) -> String {
    author.map(|a| a.login).unwrap_or_else(|| "ghost".to_string())
}

impl From<GhThread> for ReviewThread {
    fn from(thread: GhThread) -> Self {
        ReviewThread {
            id: thread.id,
            is_resolved: thread.is_resolved,
            path: thread.path,
            line: thread.line,
            comments: thread
                .comments
                .nodes
                .into_iter()
                .map(|c| ThreadComment {
                    author: login(c.author),
                    body: c.body,
                    created_at: c.created_at,
                    diff_hunk: c.diff_hunk,
                })
                .collect(),
        }
    }
}

/// Run a gh subcommand and return its stdout
async fn gh(args: &[&str], what: &str) -> Result<Vec<u8>> {
    let output = Command::new("gh")
        .args(args)
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", what))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed: {}", what, stderr.trim());
    }

    Ok(output.stdout)
}

/// Fetch PR metadata, diff, conversation and review threads using gh CLI
pub async fn fetch_pr(owner: &str, repo: &str, number: u32, commits: &[String]) -> Result<PrBundle> {
    let repo_spec = format!("{}/{}", owner, repo);
    let number_arg = number.to_string();
    tracing::info!(repo = %repo_spec, number, "fetching pull request");

    let stdout = gh(
        &[
            "pr",
            "view",
            &number_arg,
            "--repo",
            &repo_spec,
            "--json",
            "number,title,body,author,baseRefName,headRefName,url,comments",
        ],
        "gh pr view",
    )
    .await?;
    let view: GhPrView =
        serde_json::from_slice(&stdout).context("Failed to parse gh pr view output")?;

    let diff = gh(&["pr", "diff", &number_arg, "--repo", &repo_spec], "gh pr diff").await?;
    let diff = String::from_utf8_lossy(&diff).to_string();

    let threads = fetch_review_threads(owner, repo, number).await?;

    let mut commit_diffs = Vec::with_capacity(commits.len());
    for sha in commits {
        commit_diffs.push(CommitDiff {
            sha: sha.clone(),
            diff: fetch_commit_diff(owner, repo, sha).await?,
        });
    }

    let comments: Vec<IssueComment> = view
        .comments
        .into_iter()
        .map(|c| IssueComment {
            id: c.id,
            author: login(c.author),
            body: c.body,
            created_at: c.created_at,
        })
        .collect();

    tracing::info!(
        diff_bytes = diff.len(),
        comments = comments.len(),
        threads = threads.len(),
        "pull request fetched"
    );

    Ok(PrBundle {
        pr: PrContext {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number: view.number,
            title: view.title,
            body: view.body.unwrap_or_default(),
            author: view.author.login,
            base_branch: view.base_ref_name,
            head_branch: view.head_ref_name,
            url: view.url,
        },
        diff,
        commits: commit_diffs,
        comments,
        threads,
    })
}

/// Review threads with their resolution state, already grouped by GitHub
pub async fn fetch_review_threads(owner: &str, repo: &str, number: u32) -> Result<Vec<ReviewThread>> {
    let query = format!("query={}", REVIEW_THREADS_QUERY);
    let owner_arg = format!("owner={}", owner);
    let name_arg = format!("name={}", repo);
    let number_arg = format!("number={}", number);

    let stdout = gh(
        &[
            "api", "graphql", "-f", &query, "-f", &owner_arg, "-f", &name_arg, "-F", &number_arg,
        ],
        "gh api graphql",
    )
    .await?;

    parse_review_threads(&stdout)
}

fn parse_review_threads(json: &[u8]) -> Result<Vec<ReviewThread>> {
    let response: GraphQlResponse =
        serde_json::from_slice(json).context("Failed to parse review threads response")?;
    Ok(response
        .data
        .repository
        .pull_request
        .review_threads
        .nodes
        .into_iter()
        .map(ReviewThread::from)
        .collect())
}

/// Raw unified diff of a single commit
pub async fn fetch_commit_diff(owner: &str, repo: &str, sha: &str) -> Result<String> {
    let endpoint = format!("repos/{}/{}/commits/{}", owner, repo, sha);
    let stdout = gh(
        &["api", &endpoint, "-H", "Accept: application/vnd.github.diff"],
        "gh api commits",
    )
    .await?;
    Ok(String::from_utf8_lossy(&stdout).to_string())
}

/// Fetch open PRs for a repo: ready PRs first, then drafts, newest first within each
pub async fn fetch_pr_list(owner: &str, repo: &str) -> Result<Vec<PrListItem>> {
    let repo_spec = format!("{}/{}", owner, repo);
    let stdout = gh(
        &[
            "pr",
            "list",
            "--repo",
            &repo_spec,
            "--limit",
            "50",
            "--json",
            "number,title,author,headRefName,isDraft,additions,deletions",
        ],
        "gh pr list",
    )
    .await?;

    let pr_list: Vec<GhPrListItem> =
        serde_json::from_slice(&stdout).context("Failed to parse gh pr list output")?;

    let mut items: Vec<PrListItem> = pr_list
        .into_iter()
        .map(|p| PrListItem {
            number: p.number,
            title: p.title,
            author: p.author.login,
            head_branch: p.head_ref_name,
            is_draft: p.is_draft,
            additions: p.additions,
            deletions: p.deletions,
        })
        .collect();

    items.sort_by(|a, b| a.is_draft.cmp(&b.is_draft).then_with(|| b.number.cmp(&a.number)));

    Ok(items)
}

/// Parse a PR URL or owner/repo#number format
pub fn parse_pr_reference(input: &str) -> Result<(String, String, u32)> {
    // https://github.com/owner/repo/pull/123
    if input.contains("github.com") {
        let parts: Vec<&str> = input.trim_end_matches('/').split('/').collect();
        if let Some(pos) = parts.iter().position(|&p| p == "github.com")
            && parts.len() > pos + 4
            && parts[pos + 3] == "pull"
        {
            let number: u32 = parts[pos + 4].parse().context("Invalid PR number")?;
            return Ok((parts[pos + 1].to_string(), parts[pos + 2].to_string(), number));
        }
        anyhow::bail!("Invalid GitHub PR URL format");
    }

    // owner/repo#123
    if let Some((repo_part, number_str)) = input.split_once('#')
        && let Some((owner, repo)) = repo_part.split_once('/')
    {
        let number: u32 = number_str.parse().context("Invalid PR number")?;
        return Ok((owner.to_string(), repo.to_string(), number));
    }

    anyhow::bail!(
        "Invalid PR reference. Use: owner/repo#123 or https://github.com/owner/repo/pull/123"
    );
}

/// Split an `owner/repo` spec
pub fn parse_repo_spec(input: &str) -> Result<(String, String)> {
    let (owner, repo) = input
        .split_once('/')
        .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
        .context("Invalid repo format. Use owner/repo")?;
    Ok((owner.to_string(), repo.to_string()))
}
