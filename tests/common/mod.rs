//! Shared helpers for rpcompose CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory so no `.env` or log file leaks between runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write `contents` to `name` inside the work directory
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// The compiled binary, run from the work directory with a private log file
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("rpcompose").expect("Failed to locate rpcompose binary");
        cmd.current_dir(self.work_dir())
            .env_remove("RPCOMPOSE_MODE")
            .env_remove("RPCOMPOSE_TEMPLATES")
            .args(["--log-file", "test.log"]);
        cmd
    }
}
