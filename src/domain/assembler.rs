use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::block_format;
use super::diff_segment;
use super::selection_payload;
use super::types::{DiffBlock, PromptBlock};

pub const DIFF_TOKEN_NAME: &str = "DIFF_CONTENT";
pub const DIFF_SENTINEL: &str = "(diff content here, possibly empty if not selected for template)";

const SEPARATOR: &str = "\n\n";

static DIFF_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*DIFF_CONTENT\s*\}\}").expect("valid diff token regex"));

/// Where a template asks for the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionMarker {
    /// `{{DIFF_CONTENT}}`
    Token,
    /// The literal sentinel phrase
    Sentinel,
}

impl InjectionMarker {
    /// Checked in this order; the first kind present receives the payload
    pub const PRIORITY: [InjectionMarker; 2] = [InjectionMarker::Token, InjectionMarker::Sentinel];

    fn occurrences(self, text: &str) -> Vec<Range<usize>> {
        match self {
            InjectionMarker::Token => DIFF_TOKEN.find_iter(text).map(|m| m.range()).collect(),
            InjectionMarker::Sentinel => text
                .match_indices(DIFF_SENTINEL)
                .map(|(start, s)| start..start + s.len())
                .collect(),
        }
    }

    pub fn is_present(self, text: &str) -> bool {
        match self {
            InjectionMarker::Token => DIFF_TOKEN.is_match(text),
            InjectionMarker::Sentinel => text.contains(DIFF_SENTINEL),
        }
    }
}

/// Highest-priority marker kind found in `template`
pub fn detect_marker(template: &str) -> Option<InjectionMarker> {
    InjectionMarker::PRIORITY
        .into_iter()
        .find(|marker| marker.is_present(template))
}

/// Which blocks go into the prompt, and which files of the active diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_blocks: HashSet<String>,
    pub active_diff: Option<String>,
    /// `None` means every file of the active diff
    pub selected_files: Option<HashSet<String>>,
}

impl SelectionState {
    /// Fresh state for a (re)established block list. An explicit
    /// pre-selection replaces the computed defaults.
    pub fn initialize(blocks: &[PromptBlock], preselected: Option<HashSet<String>>) -> Self {
        let active_diff = blocks
            .iter()
            .find_map(PromptBlock::as_diff)
            .map(|diff| diff.id.clone());

        Self {
            selected_blocks: preselected.unwrap_or_else(|| default_selection(blocks)),
            active_diff,
            selected_files: None,
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_blocks.contains(id)
    }

    pub fn toggle_block(&mut self, id: &str) {
        if !self.selected_blocks.remove(id) {
            self.selected_blocks.insert(id.to_string());
        }
    }

    pub fn set_selected_files(&mut self, files: HashSet<String>) {
        self.selected_files = Some(files);
    }

    /// Selected files of the active diff, resolving `None` to every file
    pub fn files_for(&self, all_files: &[String]) -> HashSet<String> {
        match &self.selected_files {
            Some(files) => files.clone(),
            None => all_files.iter().cloned().collect(),
        }
    }
}

/// Every block except resolved review threads
pub fn default_selection(blocks: &[PromptBlock]) -> HashSet<String> {
    blocks
        .iter()
        .filter(|block| !block.is_resolved_thread())
        .map(|block| block.id().to_string())
        .collect()
}

/// Resolved review threads start collapsed; everything else expanded
pub fn default_collapsed(blocks: &[PromptBlock]) -> HashSet<String> {
    blocks
        .iter()
        .filter(|block| block.is_resolved_thread())
        .map(|block| block.id().to_string())
        .collect()
}

/// Drop blank parts, right-trim the rest, and separate them with one blank line
pub fn join_blocks<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| part.as_ref())
        .filter(|part| !part.trim().is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub struct AssembleInput<'a> {
    pub template: &'a str,
    pub user_text: &'a str,
    pub blocks: &'a [PromptBlock],
    pub selection: &'a SelectionState,
}

/// Merge template, selected blocks, diff payload and user text into the
/// final prompt. The diff payload appears at most once: injected at the
/// template's marker when there is one, otherwise as the leading section
/// of an untemplated prompt.
pub fn assemble(input: &AssembleInput<'_>) -> String {
    let active = active_diff(input);
    let diff_payload = match active {
        Some(diff) if input.selection.is_selected(&diff.id) => payload_for(diff, input.selection),
        _ => String::new(),
    };

    let active_id = active.map(|diff| diff.id.as_str());
    let formatted: Vec<String> = input
        .blocks
        .iter()
        .filter(|block| input.selection.is_selected(block.id()))
        .filter(|block| Some(block.id()) != active_id)
        .map(block_format::format)
        .collect();
    let non_diff_payload = join_blocks(&formatted);

    let template = input.template.trim();
    let user_text = input.user_text.trim();

    let parts = if template.is_empty() {
        [diff_payload, non_diff_payload, user_text.to_string()]
    } else {
        let rendered = match detect_marker(template) {
            Some(primary) => inject(template, primary, &diff_payload),
            None => template.to_string(),
        };
        [rendered, non_diff_payload, user_text.to_string()]
    };

    join_blocks(&parts).trim_end().to_string()
}

/// True when there is nothing at all to hand off
pub fn nothing_to_send(input: &AssembleInput<'_>) -> bool {
    let any_selected = input
        .blocks
        .iter()
        .any(|block| input.selection.is_selected(block.id()));
    !any_selected && input.template.trim().is_empty() && input.user_text.trim().is_empty()
}

/// Payload for a diff block under the current file selection
pub fn payload_for(diff: &DiffBlock, selection: &SelectionState) -> String {
    let segmented = diff_segment::split(&diff.patch);
    let all_files = segmented.paths();
    let selected = selection.files_for(&all_files);
    selection_payload::build(&selected, &all_files, &segmented)
}

fn active_diff<'a>(input: &AssembleInput<'a>) -> Option<&'a DiffBlock> {
    let id = input.selection.active_diff.as_deref()?;
    input
        .blocks
        .iter()
        .filter_map(PromptBlock::as_diff)
        .find(|diff| diff.id == id)
}

// The first `primary` marker takes the payload, every other marker of either
// kind is blanked, and lines left empty by that are dropped. Template blank
// lines meeting across a dropped line merge into one; the payload is left as is.
fn inject(template: &str, primary: InjectionMarker, payload: &str) -> String {
    let mut injected = false;
    let mut lines: Vec<String> = Vec::new();

    for line in template.split('\n') {
        if line.trim().is_empty() && lines.last().is_some_and(|prev| prev.trim().is_empty()) {
            continue;
        }

        let mut hits: Vec<(Range<usize>, InjectionMarker)> = InjectionMarker::PRIORITY
            .into_iter()
            .flat_map(|marker| {
                marker
                    .occurrences(line)
                    .into_iter()
                    .map(move |range| (range, marker))
            })
            .collect();

        if hits.is_empty() {
            lines.push(line.to_string());
            continue;
        }
        hits.sort_by_key(|(range, _)| range.start);

        let mut rendered = String::with_capacity(line.len() + payload.len());
        let mut cursor = 0;
        for (range, marker) in hits {
            if range.start < cursor {
                continue;
            }
            rendered.push_str(&line[cursor..range.start]);
            if marker == primary && !injected {
                rendered.push_str(payload);
                injected = true;
            }
            cursor = range.end;
        }
        rendered.push_str(&line[cursor..]);

        if !rendered.trim().is_empty() {
            lines.push(rendered);
        }
    }

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CommentBlock;

    const TWO_FILE_DIFF: &str = "diff --git a/file1.txt b/file1.txt\n\
--- a/file1.txt\n\
+++ b/file1.txt\n\
@@ -0,0 +1 @@\n\
+content1\n\
diff --git a/file2.txt b/file2.txt\n\
--- a/file2.txt\n\
+++ b/file2.txt\n\
@@ -0,0 +1 @@\n\
+content2\n";

    fn diff_block() -> PromptBlock {
        PromptBlock::Diff(DiffBlock {
            id: "pr-diff".into(),
            header: "### diff".into(),
            patch: TWO_FILE_DIFF.into(),
        })
    }

    fn comment(id: &str, body: &str) -> CommentBlock {
        CommentBlock {
            id: id.into(),
            header: format!("### {}", id),
            comment_body: body.into(),
            author: "octo".into(),
            timestamp: None,
            thread_id: None,
            resolved: None,
            file_path: None,
            line: None,
            diff_hunk: None,
        }
    }

    fn thread(id: &str, resolved: bool) -> PromptBlock {
        PromptBlock::Comment(CommentBlock {
            thread_id: Some(format!("T_{}", id)),
            resolved: Some(resolved),
            file_path: Some("src/lib.rs".into()),
            line: Some(12),
            ..comment(id, "> _@octo · Jan 1, 2024 00:00 UTC_\n\nnit")
        })
    }

    fn files(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn run(template: &str, user_text: &str, blocks: &[PromptBlock], selection: &SelectionState) -> String {
        assemble(&AssembleInput {
            template,
            user_text,
            blocks,
            selection,
        })
    }

    #[test]
    fn join_blocks_ignores_blank_parts() {
        assert_eq!(join_blocks(&["A", "", "  ", "B"]), join_blocks(&["A", "B"]));
        assert_eq!(join_blocks(&["A", "B"]), "A\n\nB");
        assert_eq!(join_blocks(&["  A  \n", ""]), "  A");
        assert_eq!(join_blocks::<&str>(&[]), "");
    }

    #[test]
    fn resolved_threads_start_unselected_and_collapsed() {
        let blocks = vec![diff_block(), thread("open", false), thread("done", true)];
        let selected = default_selection(&blocks);

        assert!(selected.contains("pr-diff"));
        assert!(selected.contains("open"));
        assert!(!selected.contains("done"));
        assert_eq!(default_collapsed(&blocks), files(&["done"]));
    }

    #[test]
    fn preselection_overrides_defaults() {
        let blocks = vec![diff_block(), thread("done", true)];
        let state = SelectionState::initialize(&blocks, Some(files(&["done"])));

        assert_eq!(state.selected_blocks, files(&["done"]));
        assert_eq!(state.active_diff.as_deref(), Some("pr-diff"));
        assert!(state.selected_files.is_none());
    }

    #[test]
    fn sentinel_template_with_partial_file_selection() {
        let blocks = vec![diff_block()];
        let mut state = SelectionState::initialize(&blocks, None);
        state.set_selected_files(files(&["file1.txt"]));

        let out = run(
            "### diff\n(diff content here, possibly empty if not selected for template)",
            "",
            &blocks,
            &state,
        );

        assert!(out.contains("diff --git a/file1.txt b/file1.txt\n--- a/file1.txt"));
        assert!(out.contains("+content1"));
        assert!(!out.contains("content2"));
        assert!(!out.contains(DIFF_SENTINEL));
        assert!(out.contains("- file2.txt _(diff omitted)_"));
    }

    #[test]
    fn injected_diff_is_not_appended_again() {
        let blocks = vec![diff_block(), PromptBlock::Comment(comment("meta", "Title: x"))];
        let state = SelectionState::initialize(&blocks, None);

        let out = run("Review this:\n{{DIFF_CONTENT}}\nThanks", "focus on tests", &blocks, &state);

        assert_eq!(out.matches("+content1").count(), 1);
        assert_eq!(out.matches("### files changed").count(), 1);
        assert!(out.starts_with("Review this:\n### files changed (2)"));
        assert!(out.ends_with("### meta\nTitle: x\n\nfocus on tests"));
    }

    #[test]
    fn both_marker_kinds_inject_once_at_token() {
        let blocks = vec![diff_block()];
        let state = SelectionState::initialize(&blocks, None);
        let template = format!("Top\n{}\nMiddle\n{{{{ DIFF_CONTENT }}}}\nEnd", DIFF_SENTINEL);

        let out = run(&template, "", &blocks, &state);

        assert_eq!(out.matches("+content2").count(), 1);
        assert!(!out.contains(DIFF_SENTINEL));
        assert!(!out.contains("DIFF_CONTENT"));
        let middle = out.find("Middle").unwrap();
        let payload = out.find("### files changed").unwrap();
        assert!(middle < payload);
        assert!(out.starts_with("Top\nMiddle\n"));
    }

    #[test]
    fn unselected_diff_empties_the_marker() {
        let blocks = vec![diff_block()];
        let mut state = SelectionState::initialize(&blocks, None);
        state.toggle_block("pr-diff");

        let out = run("Intro\n{{DIFF_CONTENT}}\nOutro", "", &blocks, &state);
        assert_eq!(out, "Intro\nOutro");
    }

    #[test]
    fn dropped_marker_between_blank_lines_leaves_one_gap() {
        let blocks = vec![diff_block()];
        let mut state = SelectionState::initialize(&blocks, None);
        state.toggle_block("pr-diff");

        let out = run("Intro\n\n{{DIFF_CONTENT}}\n\nOutro", "", &blocks, &state);
        assert_eq!(out, "Intro\n\nOutro");
    }

    #[test]
    fn outranked_sentinel_between_blank_lines_leaves_one_gap() {
        let blocks = vec![diff_block()];
        let state = SelectionState::initialize(&blocks, None);
        let template = format!("{{{{DIFF_CONTENT}}}}\n\n{}\n\nOutro", DIFF_SENTINEL);

        let out = run(&template, "", &blocks, &state);
        assert!(!out.contains("\n\n\n"));
        assert!(out.ends_with("+content2\n\nOutro"));
    }

    #[test]
    fn blank_context_lines_in_payload_survive() {
        let patch = "diff --git a/gaps.txt b/gaps.txt\n@@ -1,5 +1,5 @@\n-a\n+b\n \n \n \n+c\n";
        let blocks = vec![PromptBlock::Diff(DiffBlock {
            id: "pr-diff".into(),
            header: "### diff".into(),
            patch: patch.into(),
        })];
        let state = SelectionState::initialize(&blocks, None);

        let out = run("Intro\n\n{{DIFF_CONTENT}}\n\nOutro", "", &blocks, &state);
        assert!(out.contains("+b\n \n \n \n+c"));
        assert!(out.starts_with("Intro\n\n"));
        assert!(out.ends_with("\n\nOutro"));
    }

    #[test]
    fn template_without_marker_is_verbatim_and_diff_dropped() {
        let blocks = vec![diff_block()];
        let state = SelectionState::initialize(&blocks, None);

        let out = run("  Just do it.  ", "", &blocks, &state);
        assert_eq!(out, "Just do it.");
    }

    #[test]
    fn no_template_puts_diff_first() {
        let blocks = vec![PromptBlock::Comment(comment("meta", "Body")), diff_block()];
        let state = SelectionState::initialize(&blocks, None);

        let out = run("", "  please review  ", &blocks, &state);

        assert!(out.starts_with("### files changed (2)"));
        assert!(out.ends_with("### meta\nBody\n\nplease review"));
    }

    #[test]
    fn inactive_diff_blocks_are_formatted_raw() {
        let commit = PromptBlock::Diff(DiffBlock {
            id: "commit-abc1234".into(),
            header: "### commit abc1234".into(),
            patch: "diff --git a/c.rs b/c.rs\n+commit only\n".into(),
        });
        let blocks = vec![diff_block(), commit];
        let state = SelectionState::initialize(&blocks, None);

        let out = run("", "", &blocks, &state);
        assert!(out.ends_with("### commit abc1234\ndiff --git a/c.rs b/c.rs\n+commit only"));
        assert_eq!(out.matches("### files changed").count(), 1);
    }

    #[test]
    fn missing_active_diff_yields_no_payload() {
        let blocks = vec![diff_block()];
        let mut state = SelectionState::initialize(&blocks, None);
        state.active_diff = Some("gone".into());

        let out = run("{{DIFF_CONTENT}}\nrest", "", &blocks, &state);
        assert!(out.starts_with("rest"));
        assert!(out.contains("### diff\ndiff --git a/file1.txt"));
    }

    #[test]
    fn empty_request_is_detected() {
        let blocks = vec![thread("done", true)];
        let state = SelectionState::initialize(&blocks, None);
        let input = AssembleInput {
            template: "  ",
            user_text: "\n",
            blocks: &blocks,
            selection: &state,
        };
        assert!(nothing_to_send(&input));
        assert_eq!(assemble(&input), "");

        let input = AssembleInput { user_text: "hi", ..input };
        assert!(!nothing_to_send(&input));
    }
}
