//! Locate, fetch and install the prebuilt `loam` CLI for the running host.
//!
//! - [`locator`] turns a name, version and target into candidate download URLs.
//! - [`acquire`] hands those URLs to an [`Acquirer`] together with the install path.
//! - [`io::download::HttpAcquirer`] is the default acquirer: it downloads a
//!   `.tar.gz` release, unpacks it and installs the executable.

pub mod acquire;
pub mod config;
pub mod io;
pub mod locator;
pub mod paths;

pub use acquire::{
    AcquireRequest, Acquirer, AcquisitionError, BinaryHandle, BinarySource, FailedAttempt,
    GetBinaryError, acquire, get_binary, get_binary_on,
};
pub use config::AcquireConfig;
pub use io::download::HttpAcquirer;
pub use locator::{DEFAULT_NAME, build_candidate_urls, candidate_urls, canonical_url};
pub use loam_bin_schema::{Target, UnsupportedPlatformError, resolve_target};

/// User Agent string for release downloads
pub const USER_AGENT: &str = concat!("loam-bin-core/", env!("CARGO_PKG_VERSION"));
