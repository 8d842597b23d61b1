use std::collections::HashSet;

use super::diff_segment::SegmentedDiff;
use super::types::FilePatch;

const MAX_LINES: usize = 400;
const MAX_BYTES: usize = 100_000;

/// Build the manifest-plus-body payload for a partial file selection.
///
/// Every path in `all_files` is listed once in the manifest, sorted by code
/// point. Only selected paths contribute their patch to the body, and they do
/// so in that same sorted order.
pub fn build(selected_files: &HashSet<String>, all_files: &[String], patches: &SegmentedDiff) -> String {
    let mut sorted_all: Vec<&str> = all_files.iter().map(String::as_str).collect();
    sorted_all.sort_unstable();
    sorted_all.dedup();

    let mut header = vec![format!("### files changed ({})", sorted_all.len())];
    for path in &sorted_all {
        if selected_files.contains(*path) {
            header.push(format!("- {}", path));
        } else {
            header.push(omitted_bullet(path, patches.get(path)));
        }
    }

    let body = sorted_all
        .iter()
        .filter(|path| selected_files.contains(**path))
        .filter_map(|path| patches.get(path))
        .map(|file| file.patch.trim())
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", header.join("\n"), body).trim().to_string()
}

fn omitted_bullet(path: &str, patch: Option<&FilePatch>) -> String {
    match patch.and_then(omission_reason) {
        Some(reason) => format!("- {} _({} – diff omitted)_", path, reason),
        None => format!("- {} _(diff omitted)_", path),
    }
}

/// Why an unselected file is worth flagging, highest priority first
fn omission_reason(patch: &FilePatch) -> Option<String> {
    if patch.is_binary {
        Some("binary file".to_string())
    } else if patch.line_count > MAX_LINES {
        Some(format!("{} lines", patch.line_count))
    } else if patch.byte_count > MAX_BYTES {
        Some(format!("{} KB", (patch.byte_count as f64 / 1024.0).round() as u64))
    } else {
        None
    }
}

/// Short summary such as "3 of 5 files"
pub fn selection_label(selected: usize, total: usize) -> String {
    let noun = if total == 1 { "file" } else { "files" };
    format!("{} of {} {}", selected, total, noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diff_segment::split;

    fn set(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn file_diff(path: &str, added: usize) -> String {
        let mut text = format!("diff --git a/{path} b/{path}\n--- a/{path}\n+++ b/{path}\n@@ -0,0 +1,{added} @@\n");
        for i in 0..added {
            text.push_str(&format!("+line {i}\n"));
        }
        text
    }

    #[test]
    fn manifest_is_sorted_and_body_follows_sorted_order() {
        let diff = format!("{}{}", file_diff("zeta.rs", 1), file_diff("alpha.rs", 1));
        let patches = split(&diff);
        let out = build(&set(&["zeta.rs", "alpha.rs"]), &patches.paths(), &patches);

        assert!(out.starts_with("### files changed (2)\n- alpha.rs\n- zeta.rs\n\n"));
        let alpha = out.find("diff --git a/alpha.rs").unwrap();
        let zeta = out.find("diff --git a/zeta.rs").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn empty_selection_keeps_manifest_and_drops_body() {
        let diff = format!("{}{}", file_diff("a.txt", 1), file_diff("b.txt", 2));
        let patches = split(&diff);
        let out = build(&HashSet::new(), &patches.paths(), &patches);

        assert_eq!(
            out,
            "### files changed (2)\n- a.txt _(diff omitted)_\n- b.txt _(diff omitted)_"
        );
    }

    #[test]
    fn no_files_reports_zero() {
        let out = build(&HashSet::new(), &[], &SegmentedDiff::default());
        assert_eq!(out, "### files changed (0)");
    }

    #[test]
    fn binary_outranks_line_count() {
        let mut diff = file_diff("big.bin", 450);
        diff.push_str("Binary files a/big.bin and b/big.bin differ\n");
        let patches = split(&diff);
        let out = build(&HashSet::new(), &files(&["big.bin"]), &patches);

        assert!(out.contains("- big.bin _(binary file – diff omitted)_"));
        assert!(!out.contains("lines"));
    }

    #[test]
    fn large_files_report_lines_then_kilobytes() {
        let mut wide = String::from("diff --git a/wide.min.js b/wide.min.js\n+");
        wide.push_str(&"x".repeat(150_000));
        wide.push('\n');
        let diff = format!("{}{}", file_diff("long.rs", 401), wide);
        let patches = split(&diff);
        let out = build(&HashSet::new(), &patches.paths(), &patches);

        assert!(out.contains("- long.rs _(401 lines – diff omitted)_"));
        let kb = (patches.get("wide.min.js").unwrap().byte_count as f64 / 1024.0).round();
        assert!(out.contains(&format!("- wide.min.js _({} KB – diff omitted)_", kb)));
    }

    #[test]
    fn exactly_at_thresholds_has_no_reason() {
        let patches = split(&file_diff("edge.rs", 400));
        let out = build(&HashSet::new(), &files(&["edge.rs"]), &patches);
        assert!(out.contains("- edge.rs _(diff omitted)_"));
    }

    // One added line padded so the whole section is `total` bytes
    fn sized_diff(path: &str, total: usize) -> String {
        let header = format!("diff --git a/{path} b/{path}\n");
        format!("{header}+{}\n", "x".repeat(total - header.len() - 2))
    }

    #[test]
    fn byte_threshold_is_exclusive() {
        let diff = format!("{}{}", sized_diff("at.txt", MAX_BYTES), sized_diff("over.txt", MAX_BYTES + 1));
        let patches = split(&diff);
        assert_eq!(patches.get("at.txt").unwrap().byte_count, 100_000);
        assert_eq!(patches.get("over.txt").unwrap().byte_count, 100_001);

        let out = build(&HashSet::new(), &files(&["at.txt", "over.txt"]), &patches);
        assert!(out.contains("- at.txt _(diff omitted)_"));
        assert!(out.contains("- over.txt _(98 KB – diff omitted)_"));
    }

    #[test]
    fn unknown_paths_are_listed_without_metadata() {
        let patches = split(&file_diff("known.rs", 1));
        let out = build(&set(&["known.rs", "ghost.rs"]), &files(&["known.rs", "ghost.rs"]), &patches);

        assert!(out.contains("- ghost.rs\n- known.rs"));
        assert_eq!(out.matches("diff --git").count(), 1);
    }

    #[test]
    fn every_path_listed_once() {
        let patches = split(&format!("{}{}", file_diff("b", 1), file_diff("a", 1)));
        let out = build(&set(&["a"]), &files(&["b", "a", "b"]), &patches);
        assert!(out.starts_with("### files changed (2)\n"));
        assert_eq!(out.matches("- b _(diff omitted)_").count(), 1);
        assert_eq!(out.matches("\n- a\n").count(), 1);
    }

    #[test]
    fn label_counts_selection() {
        assert_eq!(selection_label(3, 5), "3 of 5 files");
        assert_eq!(selection_label(1, 1), "1 of 1 file");
    }
}
