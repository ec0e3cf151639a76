//! loam-bin - fetch and run the prebuilt loam CLI
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Resolves the host's target triple, downloads the matching `loam` release
//! archive from GitHub (or `LOAM_ARTIFACT_URL`), installs the executable and
//! runs it.
//!
//! # Environment
//!
//! ```text
//! LOAM_BIN_PATH      explicit binary location, skips the default
//! LOAM_BINARY_PATH   default location, ~/.loam/loam (exported to the child)
//! LOAM_ARTIFACT_URL  download URL tried before the GitHub release
//! RUST_LOG           log filter (e.g. loam_bin_core=debug)
//! ```

pub mod cmd;

use clap::{Parser, Subcommand};
use loam_bin_core::DEFAULT_NAME;

/// Release fetched when `--release` is not given.
pub const RELEASE_VERSION: &str = env!("LOAM_RELEASE_VERSION");

#[derive(Debug, Parser)]
#[command(name = "loam-bin")]
#[command(author, version = RELEASE_VERSION, about = "Fetch and run the prebuilt loam CLI")]
pub struct Cli {
    /// Release version to fetch
    #[arg(long, global = true, default_value = RELEASE_VERSION)]
    pub release: String,

    /// Tool name used in release asset and install paths
    #[arg(long, global = true, default_value = DEFAULT_NAME)]
    pub name: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the target triple for this host
    Target {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print candidate download URLs, highest priority first
    Urls,
    /// Download and install the binary if it is not cached
    Install,
    /// Install if needed, then run the binary with the given arguments
    Run {
        /// Arguments passed through to the binary
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_loam_and_build_version() {
        let cli = Cli::parse_from(["loam-bin", "urls"]);
        assert_eq!(cli.name, "loam");
        assert_eq!(cli.release, RELEASE_VERSION);
        assert!(matches!(cli.command, Commands::Urls));
    }

    #[test]
    fn run_forwards_flags_verbatim() {
        let cli = Cli::parse_from([
            "loam-bin", "--release", "0.9.0", "run", "build", "--profile", "-v",
        ]);
        assert_eq!(cli.release, "0.9.0");
        let Commands::Run { args } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args, ["build", "--profile", "-v"]);
    }
}
