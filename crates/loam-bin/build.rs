//! Build script to derive the default release version from git tags
//!
//! Releases are tagged `loam-cli-v<version>`; the newest such tag reachable
//! from HEAD becomes the version the binary downloads unless `--release` is
//! given. Outside a git checkout the crate version is used.

fn main() {
    // Rerun if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = std::process::Command::new("git")
        .args(["describe", "--tags", "--abbrev=0", "--match", "loam-cli-v*"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().trim_start_matches("loam-cli-v").to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=LOAM_RELEASE_VERSION={version}");
}
