use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::FilePatch;

// Git wraps a path in quotes when it needs escaping; group 1 is a quoted new path, group 2 a plain one
static FILE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^diff --git (?:"a/(?:[^"\\]|\\.)*"|a/.+?) (?:"b/((?:[^"\\]|\\.)*)"|b/(.+))$"#)
        .expect("valid file header regex")
});

static BINARY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Binary files .* and .* differ").expect("valid binary regex"));

/// Per-file patches of one diff, in the order the files first appear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedDiff {
    files: Vec<FilePatch>,
    index: HashMap<String, usize>,
}

impl SegmentedDiff {
    pub fn get(&self, path: &str) -> Option<&FilePatch> {
        self.index.get(path).map(|&i| &self.files[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Paths in diff order
    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilePatch> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    // A repeated path keeps its first position and takes the newer patch
    fn insert(&mut self, patch: FilePatch) {
        match self.index.get(&patch.path) {
            Some(&i) => self.files[i] = patch,
            None => {
                self.index.insert(patch.path.clone(), self.files.len());
                self.files.push(patch);
            }
        }
    }
}

/// Split a unified diff into per-file patches keyed by their `b/` path.
///
/// Lines before the first `diff --git` header are dropped. Anything else is
/// carried into whichever file section is open, so malformed input never fails.
pub fn split(diff_text: &str) -> SegmentedDiff {
    let mut segmented = SegmentedDiff::default();
    if diff_text.trim().is_empty() {
        return segmented;
    }

    let mut current: Option<(String, usize)> = None;
    let mut offset = 0;

    for line in diff_text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if let Some(caps) = FILE_HEADER.captures(content) {
            if let Some((path, start)) = current.take() {
                segmented.insert(finalize(path, &diff_text[start..offset]));
            }
            let path = caps
                .get(1)
                .map(|quoted| unquote(quoted.as_str()))
                .or_else(|| caps.get(2).map(|plain| plain.as_str().trim().to_string()))
                .unwrap_or_default();
            current = Some((path, offset));
        }
        offset += line.len();
    }

    if let Some((path, start)) = current {
        segmented.insert(finalize(path, &diff_text[start..]));
    }

    segmented
}

// Undo git's C-style path quoting: backslash escapes and octal-coded bytes
fn unquote(quoted: &str) -> String {
    let mut bytes = Vec::with_capacity(quoted.len());
    let mut rest = quoted.bytes().peekable();
    while let Some(byte) = rest.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match rest.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(digit @ b'0'..=b'7') => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match rest.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            rest.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn finalize(path: String, text: &str) -> FilePatch {
    let is_binary = text.lines().any(|line| BINARY_MARKER.is_match(line));
    let line_count = if is_binary {
        0
    } else {
        text.lines().filter(|line| is_content_change(line)).count()
    };

    FilePatch {
        path,
        patch: text.to_string(),
        line_count,
        byte_count: text.len(),
        is_binary,
    }
}

fn is_content_change(line: &str) -> bool {
    (line.starts_with('+') && !line.starts_with("+++"))
        || (line.starts_with('-') && !line.starts_with("---"))
}
