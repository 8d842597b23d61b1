use anyhow::{Context, Result};
use url::Url;

/// Put the prompt on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to clipboard")?;
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}

/// RepoPrompt deep link carrying the prompt as a query parameter
pub fn deep_link(base: &str, prompt: &str) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid launch URL: {}", base))?;
    url.query_pairs_mut().append_pair("prompt", prompt);
    Ok(url)
}

/// Hand the link to the platform opener
pub async fn open_deep_link(url: &Url) -> Result<()> {
    let (program, prefix): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    };

    let status = tokio::process::Command::new(program)
        .args(prefix)
        .arg(url.as_str())
        .status()
        .await
        .with_context(|| format!("Failed to execute {}", program))?;

    if !status.success() {
        anyhow::bail!("{} exited with {}", program, status);
    }
    tracing::info!(scheme = url.scheme(), "opened deep link");
    Ok(())
}
