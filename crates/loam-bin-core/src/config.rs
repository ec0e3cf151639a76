//! Acquisition settings read from the process environment.
//!
//! The environment is read once into an [`AcquireConfig`]. The default install
//! location is then written into that struct rather than back into the
//! environment, so callers can inspect it and tests never touch real process
//! state.

use std::path::{Path, PathBuf};

use crate::paths;

/// Explicit binary location. When set, the default path is never computed.
pub const BIN_PATH_VAR: &str = "LOAM_BIN_PATH";

/// Default install location handed to the acquisition service.
pub const BINARY_PATH_VAR: &str = "LOAM_BINARY_PATH";

/// Download URL tried before the canonical release URL.
pub const ARTIFACT_URL_VAR: &str = "LOAM_ARTIFACT_URL";

/// Configuration for a single acquisition request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquireConfig {
    /// Operator-supplied binary location (`LOAM_BIN_PATH`).
    pub bin_path: Option<PathBuf>,
    /// Computed default install location (`LOAM_BINARY_PATH`).
    pub binary_path: Option<PathBuf>,
    /// Override download URL (`LOAM_ARTIFACT_URL`).
    pub artifact_url: Option<String>,
    /// Home directory the default path is derived from.
    pub home_dir: Option<PathBuf>,
}

impl AcquireConfig {
    /// Load configuration from environment variables and the user's home directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok()).with_home(paths::try_home())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            bin_path: var(BIN_PATH_VAR).map(PathBuf::from),
            binary_path: var(BINARY_PATH_VAR).map(PathBuf::from),
            artifact_url: var(ARTIFACT_URL_VAR),
            home_dir: None,
        }
    }

    /// Set the home directory the default install path is derived from.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home_dir = home;
        self
    }

    /// Fill in `binary_path` with `<home>/.<name>/<name>` unless `bin_path` is set.
    ///
    /// Returns `true` when a value was written. Repeated calls write the same
    /// value.
    pub fn apply_default_binary_path(&mut self, name: &str) -> bool {
        if self.bin_path.is_some() {
            return false;
        }
        let Some(home) = self.home_dir.as_deref() else {
            tracing::debug!("No home directory, leaving {BINARY_PATH_VAR} unset");
            return false;
        };

        let path = paths::default_binary_path(home, name);
        tracing::debug!("{BINARY_PATH_VAR}={}", path.display());
        self.binary_path = Some(path);
        true
    }

    /// Where the binary should live: the explicit override first, then the default.
    pub fn install_path(&self) -> Option<&Path> {
        self.bin_path.as_deref().or(self.binary_path.as_deref())
    }
}
