//! Release artifact URLs.
//!
//! Artifacts are published as GitHub release assets named
//! `<name>-cli-v<version>-<triple>.tar.gz` under the tag `<name>-cli-v<version>`.

use loam_bin_schema::{Target, UnsupportedPlatformError, resolve_target};

/// Tool name used when the caller does not supply one.
pub const DEFAULT_NAME: &str = "loam";

const RELEASE_ORG: &str = "loambuild";
const RELEASE_REPO: &str = "loam-sdk";

/// Release tag for a version, e.g. `loam-cli-v0.9.0`.
pub fn release_tag(name: &str, version: &str) -> String {
    format!("{name}-cli-v{version}")
}

/// The canonical download URL of a release artifact.
pub fn canonical_url(name: &str, version: &str, target: &Target) -> String {
    let tag = release_tag(name, version);
    format!(
        "https://github.com/{RELEASE_ORG}/{RELEASE_REPO}/releases/download/{tag}/{tag}-{target}.tar.gz"
    )
}

/// Download locations in priority order: the override (if any, and non-empty)
/// followed by the canonical URL.
pub fn candidate_urls(
    name: &str,
    version: &str,
    target: &Target,
    override_url: Option<&str>,
) -> Vec<String> {
    let mut urls = vec![canonical_url(name, version, target)];
    if let Some(url) = override_url.filter(|u| !u.is_empty()) {
        urls.insert(0, url.to_string());
    }
    urls
}

/// [`candidate_urls`] for the running host.
pub fn build_candidate_urls(
    name: &str,
    version: &str,
    override_url: Option<&str>,
) -> Result<Vec<String>, UnsupportedPlatformError> {
    let target = resolve_target()?;
    Ok(candidate_urls(name, version, &target, override_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_bin_schema::resolve;

    #[test]
    fn canonical_url_matches_release_layout() {
        let target = resolve("Darwin", "x64").unwrap();
        assert_eq!(
            canonical_url(DEFAULT_NAME, "1.2.3", &target),
            "https://github.com/loambuild/loam-sdk/releases/download/loam-cli-v1.2.3/loam-cli-v1.2.3-x86_64-apple-darwin.tar.gz"
        );
    }

    #[test]
    fn canonical_url_uses_name_in_tag_and_asset() {
        let target = resolve("Linux", "arm64").unwrap();
        assert_eq!(
            canonical_url("soroban", "0.1.0", &target),
            "https://github.com/loambuild/loam-sdk/releases/download/soroban-cli-v0.1.0/soroban-cli-v0.1.0-aarch64-unknown-linux-gnu.tar.gz"
        );
    }

    #[test]
    fn without_override_only_canonical() {
        let target = resolve("Windows_NT", "x64").unwrap();
        let urls = candidate_urls(DEFAULT_NAME, "0.9.0", &target, None);
        assert_eq!(urls, vec![canonical_url(DEFAULT_NAME, "0.9.0", &target)]);
    }

    #[test]
    fn override_goes_first() {
        let target = resolve("Linux", "x64").unwrap();
        let urls = candidate_urls(
            DEFAULT_NAME,
            "0.9.0",
            &target,
            Some("https://mirror.example/loam.tar.gz"),
        );
        assert_eq!(
            urls,
            vec![
                "https://mirror.example/loam.tar.gz".to_string(),
                canonical_url(DEFAULT_NAME, "0.9.0", &target),
            ]
        );
    }

    #[test]
    fn override_is_not_validated_or_deduplicated() {
        let target = resolve("Linux", "x64").unwrap();
        let canonical = canonical_url(DEFAULT_NAME, "0.9.0", &target);

        let urls = candidate_urls(DEFAULT_NAME, "0.9.0", &target, Some("not a url"));
        assert_eq!(urls[0], "not a url");

        let urls = candidate_urls(DEFAULT_NAME, "0.9.0", &target, Some(canonical.as_str()));
        assert_eq!(urls, vec![canonical.clone(), canonical]);
    }

    #[test]
    fn empty_override_is_ignored() {
        let target = resolve("Darwin", "arm64").unwrap();
        assert_eq!(candidate_urls(DEFAULT_NAME, "1.0.0", &target, Some("")).len(), 1);
    }

    #[test]
    fn host_urls_are_stable() {
        let first = build_candidate_urls(DEFAULT_NAME, "1.2.3", Some("https://a.example/x"));
        let second = build_candidate_urls(DEFAULT_NAME, "1.2.3", Some("https://a.example/x"));
        assert_eq!(first, second);

        if let Ok(urls) = first {
            assert_eq!(urls.len(), 2);
            assert_eq!(urls[0], "https://a.example/x");
        }
    }
}
