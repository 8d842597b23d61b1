use super::block_format::format_thread_body;
use super::types::{CommentBlock, DiffBlock, IssueComment, PrBundle, PrContext, PromptBlock, ReviewThread};

pub const PR_META_ID: &str = "pr-meta";
pub const PR_DIFF_ID: &str = "pr-diff";
pub const LOCAL_DIFF_ID: &str = "local-diff";

/// Turn a fetched PR into prompt blocks: metadata, PR diff, commit diffs,
/// conversation comments, then review threads.
pub fn build_blocks(bundle: &PrBundle) -> Vec<PromptBlock> {
    let mut blocks = vec![metadata_block(&bundle.pr)];

    if !bundle.diff.trim().is_empty() {
        blocks.push(PromptBlock::Diff(DiffBlock {
            id: PR_DIFF_ID.to_string(),
            header: format!("## Diff for #{}", bundle.pr.number),
            patch: bundle.diff.clone(),
        }));
    }

    for commit in &bundle.commits {
        let short = short_sha(&commit.sha);
        blocks.push(PromptBlock::Diff(DiffBlock {
            id: format!("commit-{}", short),
            header: format!("## Commit {}", short),
            patch: commit.diff.clone(),
        }));
    }

    blocks.extend(bundle.comments.iter().map(comment_block));
    blocks.extend(
        bundle
            .threads
            .iter()
            .filter(|thread| !thread.comments.is_empty())
            .map(thread_block),
    );

    blocks
}

/// A single diff block for a diff read from disk
pub fn local_diff_blocks(diff: &str, label: &str) -> Vec<PromptBlock> {
    if diff.trim().is_empty() {
        return Vec::new();
    }
    vec![PromptBlock::Diff(DiffBlock {
        id: LOCAL_DIFF_ID.to_string(),
        header: format!("## Diff ({})", label),
        patch: diff.to_string(),
    })]
}

fn metadata_block(pr: &PrContext) -> PromptBlock {
    let description = if pr.body.trim().is_empty() {
        "No description provided"
    } else {
        pr.body.trim()
    };

    let body = format!(
        "**Repository:** {owner}/{repo}\n\
**PR:** #{number} {title}\n\
**Author:** @{author}\n\
**Branch:** {head} → {base}\n\
**URL:** {url}\n\n\
{description}",
        owner = pr.owner,
        repo = pr.repo,
        number = pr.number,
        title = pr.title,
        author = pr.author,
        head = pr.head_branch,
        base = pr.base_branch,
        url = pr.url,
        description = description,
    );

    PromptBlock::Comment(CommentBlock {
        id: PR_META_ID.to_string(),
        header: "## Pull request".to_string(),
        comment_body: body,
        author: pr.author.clone(),
        timestamp: None,
        thread_id: None,
        resolved: None,
        file_path: None,
        line: None,
        diff_hunk: None,
    })
}

fn comment_block(comment: &IssueComment) -> PromptBlock {
    PromptBlock::Comment(CommentBlock {
        id: format!("comment-{}", comment.id),
        header: format!("### Comment by @{}", comment.author),
        comment_body: comment.body.trim().to_string(),
        author: comment.author.clone(),
        timestamp: Some(comment.created_at),
        thread_id: None,
        resolved: None,
        file_path: None,
        line: None,
        diff_hunk: None,
    })
}

fn thread_block(thread: &ReviewThread) -> PromptBlock {
    let location = match (&thread.path, thread.line) {
        (Some(path), Some(line)) => format!(" on {}:{}", path, line),
        (Some(path), None) => format!(" on {}", path),
        _ => String::new(),
    };
    let status = if thread.is_resolved { " (resolved)" } else { "" };
    let first = thread.comments.iter().min_by_key(|c| c.created_at);

    PromptBlock::Comment(CommentBlock {
        id: format!("thread-{}", thread.id),
        header: format!("### Review thread{}{}", location, status),
        comment_body: format_thread_body(&thread.comments),
        author: first.map(|c| c.author.clone()).unwrap_or_default(),
        timestamp: first.map(|c| c.created_at),
        thread_id: Some(thread.id.clone()),
        resolved: Some(thread.is_resolved),
        file_path: thread.path.clone(),
        line: thread.line,
        diff_hunk: first.and_then(|c| c.diff_hunk.clone()),
    })
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
