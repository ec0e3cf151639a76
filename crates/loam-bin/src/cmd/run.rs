//! Run the installed binary, forwarding arguments and exit code
use anyhow::{Context, Result};
use loam_bin_core::config::BINARY_PATH_VAR;

use super::install::ensure_installed;

/// Returns the child's exit code (1 if it was killed by a signal).
pub async fn run(name: &str, version: &str, args: &[String]) -> Result<i32> {
    let (handle, config) = ensure_installed(name, version).await?;

    let mut command = handle.command();
    command.args(args);
    if let Some(path) = &config.binary_path {
        command.env(BINARY_PATH_VAR, path);
    }

    let status = command
        .status()
        .await
        .with_context(|| format!("Failed to run {}", handle.path().display()))?;
    Ok(status.code().unwrap_or(1))
}
