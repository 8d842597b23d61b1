use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file's slice of a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    /// Post-change (`b/`) path
    pub path: String,
    /// Verbatim text from this file's `diff --git` line up to the next one
    pub patch: String,
    /// Added + removed content lines (0 for binary files)
    pub line_count: usize,
    /// UTF-8 length of `patch`
    pub byte_count: usize,
    pub is_binary: bool,
}

/// A selectable section of the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptBlock {
    Diff(DiffBlock),
    Comment(CommentBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub id: String,
    pub header: String,
    /// Raw, possibly multi-file, unified diff
    pub patch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub id: String,
    pub header: String,
    /// Pre-formatted body text
    pub comment_body: String,
    pub author: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// Set when this block is a grouped review thread
    pub thread_id: Option<String>,
    /// Only meaningful together with `thread_id`
    pub resolved: Option<bool>,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub diff_hunk: Option<String>,
}

impl PromptBlock {
    pub fn id(&self) -> &str {
        match self {
            PromptBlock::Diff(block) => &block.id,
            PromptBlock::Comment(block) => &block.id,
        }
    }

    pub fn header(&self) -> &str {
        match self {
            PromptBlock::Diff(block) => &block.header,
            PromptBlock::Comment(block) => &block.header,
        }
    }

    pub fn as_diff(&self) -> Option<&DiffBlock> {
        match self {
            PromptBlock::Diff(block) => Some(block),
            PromptBlock::Comment(_) => None,
        }
    }

    /// True for a review thread that has been marked resolved
    pub fn is_resolved_thread(&self) -> bool {
        match self {
            PromptBlock::Comment(block) => {
                block.thread_id.is_some() && block.resolved == Some(true)
            }
            PromptBlock::Diff(_) => false,
        }
    }
}

/// Pull request metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrContext {
    pub owner: String,
    pub repo: String,
    pub number: u32,
    pub title: String,
    pub body: String,
    pub author: String,
    pub base_branch: String,
    pub head_branch: String,
    pub url: String,
}

/// A top-level conversation comment on the PR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One comment inside a review thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadComment {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub diff_hunk: Option<String>,
}

/// A review thread as GitHub groups it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewThread {
    pub id: String,
    pub is_resolved: bool,
    pub path: Option<String>,
    pub line: Option<u32>,
    pub comments: Vec<ThreadComment>,
}

/// A diff for a single commit of the PR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDiff {
    pub sha: String,
    pub diff: String,
}

/// Everything fetched for one PR
#[derive(Debug, Clone, Default)]
pub struct PrBundle {
    pub pr: PrContext,
    pub diff: String,
    pub commits: Vec<CommitDiff>,
    pub comments: Vec<IssueComment>,
    pub threads: Vec<ReviewThread>,
}

/// Row in the PR picker
#[derive(Debug, Clone)]
pub struct PrListItem {
    pub number: u32,
    pub title: String,
    pub author: String,
    pub head_branch: String,
    pub is_draft: bool,
    pub additions: u32,
    pub deletions: u32,
}
