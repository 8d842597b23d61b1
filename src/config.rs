use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_MODE: &str = "implement";
pub const DEFAULT_LAUNCH_URL: &str = "repoprompt://open";
pub const DEFAULT_LOG_FILE: &str = ".rpcompose.log";

const IMPLEMENT_TEMPLATE: &str = r#"# Implement
{{PR_SUMMARY}}

Work through the selected review threads and comments, then make the changes they ask for. Keep the diff focused on what reviewers requested.

### diff
{{DIFF_CONTENT}}"#;

const REVIEW_TEMPLATE: &str = r#"# Review
{{PR_SUMMARY}}

Review the changes below for correctness, risky behavior and missing tests. Cite file paths and line numbers for every finding.

### diff
{{DIFF_CONTENT}}"#;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Unknown mode '{mode}' (available: {available})")]
    UnknownMode { mode: String, available: String },
}

/// On-disk shape of the templates file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    launch_url: Option<String>,
    #[serde(default)]
    templates: BTreeMap<String, String>,
}

/// Prompt templates keyed by mode name
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: BTreeMap<String, String>,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert("implement".to_string(), IMPLEMENT_TEMPLATE.to_string());
        templates.insert("review".to_string(), REVIEW_TEMPLATE.to_string());
        Self { templates }
    }

    /// File entries replace built-ins of the same name and add new modes
    fn merge(&mut self, overrides: BTreeMap<String, String>) {
        self.templates.extend(overrides);
    }

    pub fn get(&self, mode: &str) -> Option<&str> {
        self.templates.get(mode).map(String::as_str)
    }

    pub fn modes(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Mode after `current`, wrapping around
    pub fn next_mode(&self, current: &str) -> String {
        let modes = self.modes();
        let next = modes
            .iter()
            .position(|m| *m == current)
            .map(|i| (i + 1) % modes.len())
            .unwrap_or(0);
        modes.get(next).map(|m| m.to_string()).unwrap_or_default()
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: String,
    pub templates: TemplateSet,
    pub launch_url: String,
    pub log_file: String,
}

impl AppConfig {
    /// Built-in templates, overlaid with `templates_path` when given
    pub fn load(mode: &str, templates_path: Option<&Path>, log_file: &str) -> Result<Self, ConfigError> {
        let mut templates = TemplateSet::builtin();
        let mut launch_url = DEFAULT_LAUNCH_URL.to_string();

        if let Some(path) = templates_path {
            let file = read_config_file(path)?;
            if let Some(url) = file.launch_url {
                launch_url = url;
            }
            templates.merge(file.templates);
        }

        if templates.get(mode).is_none() {
            return Err(ConfigError::UnknownMode {
                mode: mode.to_string(),
                available: templates.modes().join(", "),
            });
        }

        Ok(Self {
            mode: mode.to_string(),
            templates,
            launch_url,
            log_file: log_file.to_string(),
        })
    }

    /// Template text for `mode`, empty when the mode is unknown
    pub fn template_for(&self, mode: &str) -> &str {
        self.templates.get(mode).unwrap_or("")
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
