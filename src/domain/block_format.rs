use super::types::{PromptBlock, ThreadComment};

/// Render one block as it appears in the prompt: header line, then content.
pub fn format(block: &PromptBlock) -> String {
    match block {
        PromptBlock::Diff(diff) => format!("{}\n{}", diff.header, diff.patch.trim_end()),
        PromptBlock::Comment(comment) => format!("{}\n{}", comment.header, comment.comment_body),
    }
}

/// Body text for a review thread, one attributed entry per comment in
/// chronological order.
pub fn format_thread_body(comments: &[ThreadComment]) -> String {
    let mut ordered: Vec<&ThreadComment> = comments.iter().collect();
    ordered.sort_by_key(|c| c.created_at);

    ordered
        .iter()
        .map(|c| {
            format!(
                "> _@{} · {}_\n\n{}",
                c.author,
                c.created_at.format("%b %-d, %Y %H:%M UTC"),
                c.body.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
