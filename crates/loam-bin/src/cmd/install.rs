//! Download and install the binary
use anyhow::{Context, Result};
use loam_bin_core::{AcquireConfig, BinaryHandle, BinarySource, HttpAcquirer, get_binary};

/// Make sure `name` is installed, returning the handle and the configuration
/// it was resolved with.
pub async fn ensure_installed(name: &str, version: &str) -> Result<(BinaryHandle, AcquireConfig)> {
    let mut config = AcquireConfig::from_env();
    let handle = get_binary(&HttpAcquirer::new(), &mut config, name, version)
        .await
        .with_context(|| format!("Failed to install {name} v{version}"))?;

    match &handle.source {
        BinarySource::Cached => tracing::debug!("{name} already installed"),
        BinarySource::Downloaded { url } => tracing::info!("Downloaded {name} from {url}"),
    }
    Ok((handle, config))
}

pub async fn install(name: &str, version: &str) -> Result<()> {
    let (handle, _) = ensure_installed(name, version).await?;
    println!("{}", handle.path().display());
    Ok(())
}
