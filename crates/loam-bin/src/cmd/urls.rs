//! Print candidate download URLs
use anyhow::Result;
use loam_bin_core::{AcquireConfig, build_candidate_urls};

pub fn urls(name: &str, version: &str) -> Result<()> {
    let config = AcquireConfig::from_env();
    for url in build_candidate_urls(name, version, config.artifact_url.as_deref())? {
        println!("{url}");
    }
    Ok(())
}
