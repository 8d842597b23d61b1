use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::assembler::DIFF_TOKEN_NAME;
use super::types::PrContext;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_.\-]+)\}\}").expect("valid token regex"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid blank run regex"));

/// Slot values by name. `None` renders as an empty string.
pub type Slots = BTreeMap<String, Option<String>>;

/// Substitute `{{name}}` slots and tidy the whitespace they leave behind.
///
/// After substitution, a line holding nothing but a leftover token is dropped,
/// whether it came from the template or from a slot value. So is a line that
/// only held slots which rendered empty. Blank-line runs collapse to a single
/// blank line and the result is trimmed.
pub fn render(template: &str, slots: &Slots) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in template.split('\n') {
        if !TOKEN.is_match(line) {
            lines.push(line.to_string());
            continue;
        }

        let mut substituted_any = false;
        let rendered = TOKEN.replace_all(line, |caps: &Captures| match slots.get(&caps[1]) {
            Some(value) => {
                substituted_any = true;
                value.as_deref().unwrap_or("").trim().to_string()
            }
            None => caps[0].to_string(),
        });

        if substituted_any && rendered.trim().is_empty() {
            continue;
        }
        lines.extend(
            rendered
                .split('\n')
                .filter(|produced| !is_leftover_token(produced, slots))
                .map(str::to_string),
        );
    }

    collapse_blank_runs(&lines.join("\n")).trim().to_string()
}

/// Reduce any run of blank lines to exactly one
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

// The token name when the line is a single `{{token}}` and whitespace
fn lone_token(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let caps = TOKEN.captures(trimmed)?;
    if caps.get(0)?.len() != trimmed.len() {
        return None;
    }
    caps.get(1).map(|m| m.as_str())
}

// A lone token survives only when its slot renders back to the token itself
fn is_leftover_token(line: &str, slots: &Slots) -> bool {
    let Some(name) = lone_token(line) else {
        return false;
    };
    slots.get(name).and_then(|value| value.as_deref()).map(str::trim) != Some(line.trim())
}

/// Standard slots for a pull request.
///
/// `DIFF_CONTENT` maps to itself so the diff injection point survives
/// rendering and is filled in at assembly time.
pub fn pr_slots(pr: &PrContext) -> Slots {
    let mut slots = Slots::new();
    let mut put = |name: &str, value: String| {
        slots.insert(name.to_string(), Some(value));
    };

    put("REPO", format!("{}/{}", pr.owner, pr.repo));
    put("PR_NUMBER", pr.number.to_string());
    put("PR_TITLE", pr.title.clone());
    put("PR_AUTHOR", pr.author.clone());
    put("PR_URL", pr.url.clone());
    put("PR_BODY", pr.body.clone());
    put("BASE_BRANCH", pr.base_branch.clone());
    put("HEAD_BRANCH", pr.head_branch.clone());
    put(
        "PR_SUMMARY",
        format!(
            "{}/{}#{}: {} ({} → {})",
            pr.owner, pr.repo, pr.number, pr.title, pr.head_branch, pr.base_branch
        ),
    );
    put(DIFF_TOKEN_NAME, format!("{{{{{}}}}}", DIFF_TOKEN_NAME));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, Option<&str>)]) -> Slots {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn substitutes_trimmed_values() {
        let out = render("Title: {{PR_TITLE}}!", &slots(&[("PR_TITLE", Some("  Fix it \n"))]));
        assert_eq!(out, "Title: Fix it!");
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = render("{{A}} and {{A}}", &slots(&[("A", Some("x"))]));
        assert_eq!(out, "x and x");
    }

    #[test]
    fn missing_values_render_empty_not_null() {
        let out = render("by {{AUTHOR}}.", &slots(&[("AUTHOR", None)]));
        assert_eq!(out, "by .");
        assert!(!out.contains("null"));
    }

    #[test]
    fn drops_lines_of_unknown_tokens() {
        let out = render("Intro\n   {{NEVER_SET}}  \nOutro", &Slots::new());
        assert_eq!(out, "Intro\nOutro");
    }

    #[test]
    fn keeps_unknown_token_inside_text() {
        let out = render("See {{NEVER_SET}} here", &Slots::new());
        assert_eq!(out, "See {{NEVER_SET}} here");
    }

    #[test]
    fn drops_lines_emptied_by_substitution() {
        let template = "Header\n{{BODY}}\n{{A}} {{B}}\nFooter";
        let out = render(template, &slots(&[("BODY", Some("   ")), ("A", None), ("B", Some(""))]));
        assert_eq!(out, "Header\nFooter");
    }

    #[test]
    fn authored_blank_lines_survive_but_runs_collapse() {
        let template = "One\n\nTwo\n\n\n\nThree\n{{GONE}}\n\n \nFour";
        let out = render(template, &slots(&[("GONE", None)]));
        assert_eq!(out, "One\n\nTwo\n\nThree\n\nFour");
    }

    #[test]
    fn rendering_is_idempotent() {
        let template = "\n\n# {{PR_TITLE}}\n\n{{PR_BODY}}\n\n\n{{MISSING}}\nBranch {{HEAD_BRANCH}}\n";
        let s = slots(&[
            ("PR_TITLE", Some("Add cache")),
            ("PR_BODY", Some("")),
            ("HEAD_BRANCH", Some("feat/cache")),
        ]);
        let once = render(template, &s);
        assert_eq!(once, "# Add cache\n\nBranch feat/cache");
        assert_eq!(render(&once, &s), once);
    }

    #[test]
    fn token_lines_inside_values_are_dropped_once() {
        let s = slots(&[("PR_BODY", Some("Use the\n  {{NAME}}\nplaceholder"))]);
        let once = render("Body:\n{{PR_BODY}}", &s);
        assert_eq!(once, "Body:\nUse the\nplaceholder");
        assert_eq!(render(&once, &s), once);
    }

    #[test]
    fn known_token_lines_inside_values_are_dropped_too() {
        let s = slots(&[("PR_TITLE", Some("Add cache")), ("PR_BODY", Some("quoting\n{{PR_TITLE}}\nverbatim"))]);
        let once = render("# {{PR_TITLE}}\n{{PR_BODY}}", &s);
        assert_eq!(once, "# Add cache\nquoting\nverbatim");
        assert_eq!(render(&once, &s), once);
    }

    #[test]
    fn pr_slots_preserve_diff_token() {
        let pr = PrContext {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 7,
            title: "Speed up".into(),
            ..Default::default()
        };
        let out = render("{{REPO}}#{{PR_NUMBER}} {{PR_TITLE}}\n\n{{DIFF_CONTENT}}", &pr_slots(&pr));
        assert_eq!(out, "acme/widgets#7 Speed up\n\n{{DIFF_CONTENT}}");
    }
}
