mod common;

use common::TestContext;
use predicates::prelude::*;

const TWO_FILES: &str = "diff --git a/a.txt b/a.txt\n\
--- a/a.txt\n\
+++ b/a.txt\n\
@@ -0,0 +1 @@\n\
+alpha\n\
diff --git a/b.txt b/b.txt\n\
--- a/b.txt\n\
+++ b/b.txt\n\
@@ -0,0 +1 @@\n\
+beta\n";

#[test]
fn prints_local_diff_into_default_template() {
    let ctx = TestContext::new();
    ctx.write("change.diff", TWO_FILES);

    ctx.cli()
        .args(["--diff-file", "change.diff", "--print", "-t", "keep it small"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Implement\n\nWork through"))
        .stdout(predicate::str::contains(
            "### diff\n### files changed (2)\n- a.txt\n- b.txt\n\ndiff --git a/a.txt b/a.txt",
        ))
        .stdout(predicate::str::contains("+beta\n\nkeep it small\n"))
        .stdout(predicate::str::contains("{{").not());
}

#[test]
fn review_mode_from_env() {
    let ctx = TestContext::new();
    ctx.write("change.diff", TWO_FILES);

    ctx.cli()
        .env("RPCOMPOSE_MODE", "review")
        .args(["--diff-file", "change.diff", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Review"));
}

#[test]
fn custom_template_with_sentinel_marker() {
    let ctx = TestContext::new();
    ctx.write("change.diff", TWO_FILES);
    ctx.write(
        "templates.toml",
        r#"
[templates]
terse = "Fix these files.\n(diff content here, possibly empty if not selected for template)\nThanks."
"#,
    );

    ctx.cli()
        .args([
            "--diff-file",
            "change.diff",
            "--templates",
            "templates.toml",
            "-m",
            "terse",
            "--print",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Fix these files.\n### files changed (2)"))
        .stdout(predicate::str::contains("+alpha"))
        .stdout(predicate::str::contains("+beta\nThanks.\n"))
        .stdout(predicate::str::contains("possibly empty").not());
}

#[test]
fn empty_request_fails() {
    let ctx = TestContext::new();
    ctx.write("empty.diff", "");
    ctx.write("templates.toml", "[templates]\nblank = \"\"\n");

    ctx.cli()
        .args([
            "--diff-file",
            "empty.diff",
            "--templates",
            "templates.toml",
            "-m",
            "blank",
            "--print",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to send"));
}

#[test]
fn unknown_mode_lists_choices() {
    let ctx = TestContext::new();
    ctx.write("change.diff", TWO_FILES);

    ctx.cli()
        .args(["--diff-file", "change.diff", "-m", "nope", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown mode 'nope' (available: implement, review)"));
}

#[test]
fn missing_source_is_an_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("--print")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to compose from"));
}

#[test]
fn missing_diff_file_names_path() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--diff-file", "absent.diff", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.diff"));
}
