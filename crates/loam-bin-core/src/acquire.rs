//! Handoff to the acquisition service.
//!
//! The core never downloads anything itself. It works out where the binary
//! should live, builds the candidate URL list and passes both to an
//! [`Acquirer`]. Whatever the acquirer returns, success or failure, is handed
//! back to the caller untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use loam_bin_schema::{HostArch, HostOs, Target, UnsupportedPlatformError};
use thiserror::Error;

use crate::config::AcquireConfig;
use crate::locator::candidate_urls;

/// One candidate URL that could not be installed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// The candidate that was tried.
    pub url: String,
    /// Why it failed, as rendered by the underlying error.
    pub reason: String,
}

/// Errors owned by the acquisition service.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive does not contain a `{name}` executable")]
    BinaryNotFound { name: String },

    #[error("No install location for the binary; set LOAM_BIN_PATH")]
    NoInstallPath,

    #[error("No download URLs for `{name}`")]
    NoCandidates { name: String },

    #[error("Failed to download `{name}` from any source:{}", format_attempts(.attempts))]
    AllCandidatesFailed {
        name: String,
        attempts: Vec<FailedAttempt>,
    },
}

fn format_attempts(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("\n  {}: {}", a.url, a.reason))
        .collect()
}

/// Full get-binary flow: platform resolution first, then the handoff.
#[derive(Error, Debug)]
pub enum GetBinaryError {
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatformError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

/// What the acquisition service is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireRequest {
    /// Tool name; also the executable's file name inside the archive.
    pub name: String,
    /// Download locations, highest priority first.
    pub urls: Vec<String>,
    /// Where the executable is cached and installed.
    pub install_path: Option<PathBuf>,
}

/// Where an acquired binary came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinarySource {
    /// Already present at the install path.
    Cached,
    /// Freshly downloaded.
    Downloaded { url: String },
}

/// An installed, executable binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHandle {
    /// Tool name.
    pub name: String,
    /// Location of the executable, including `.exe` on Windows.
    pub path: PathBuf,
    /// Whether the binary was cached or just downloaded.
    pub source: BinarySource,
}

impl BinaryHandle {
    /// A command that runs this binary.
    pub fn command(&self) -> tokio::process::Command {
        tokio::process::Command::new(&self.path)
    }

    /// Location of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The service that fetches, places and installs the binary.
#[async_trait]
pub trait Acquirer: Send + Sync {
    /// Make `request.name` available, trying `request.urls` in order.
    async fn create(&self, request: AcquireRequest) -> Result<BinaryHandle, AcquisitionError>;
}

/// Hand `(name, urls)` to the acquisition service.
///
/// Unless `config.bin_path` is set, `config.binary_path` is first set to the
/// default install location for `name`.
pub async fn acquire<A>(
    acquirer: &A,
    config: &mut AcquireConfig,
    name: &str,
    urls: Vec<String>,
) -> Result<BinaryHandle, AcquisitionError>
where
    A: Acquirer + ?Sized,
{
    config.apply_default_binary_path(name);

    let request = AcquireRequest {
        name: name.to_string(),
        urls,
        install_path: config.install_path().map(Path::to_path_buf),
    };
    tracing::debug!(
        "Acquiring {} from {} candidate(s)",
        request.name,
        request.urls.len()
    );

    acquirer.create(request).await
}

/// Resolve the target for the given host, build the candidate URLs and acquire.
///
/// An unsupported host fails before the acquirer is called and before
/// `config` is modified.
pub async fn get_binary_on<A>(
    acquirer: &A,
    config: &mut AcquireConfig,
    os: &HostOs,
    arch: &HostArch,
    name: &str,
    version: &str,
) -> Result<BinaryHandle, GetBinaryError>
where
    A: Acquirer + ?Sized,
{
    let target = Target::from_host(os, arch)?;
    let urls = candidate_urls(name, version, &target, config.artifact_url.as_deref());
    Ok(acquire(acquirer, config, name, urls).await?)
}

/// [`get_binary_on`] for the running host.
pub async fn get_binary<A>(
    acquirer: &A,
    config: &mut AcquireConfig,
    name: &str,
    version: &str,
) -> Result<BinaryHandle, GetBinaryError>
where
    A: Acquirer + ?Sized,
{
    get_binary_on(
        acquirer,
        config,
        &HostOs::current(),
        &HostArch::current(),
        name,
        version,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed result.
    #[derive(Default)]
    struct RecordingAcquirer {
        requests: Mutex<Vec<AcquireRequest>>,
        fail: bool,
    }

    impl RecordingAcquirer {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<AcquireRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Acquirer for RecordingAcquirer {
        async fn create(&self, request: AcquireRequest) -> Result<BinaryHandle, AcquisitionError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(AcquisitionError::BinaryNotFound { name: request.name });
            }
            Ok(BinaryHandle {
                path: request.install_path.unwrap_or_default(),
                source: BinarySource::Downloaded {
                    url: request.urls[0].clone(),
                },
                name: request.name,
            })
        }
    }

    fn home_config() -> AcquireConfig {
        AcquireConfig::default().with_home(Some(PathBuf::from("/home/dev")))
    }

    #[tokio::test]
    async fn linux_x64_end_to_end() {
        let acquirer = RecordingAcquirer::default();
        let mut config = home_config();

        let handle = get_binary_on(
            &acquirer,
            &mut config,
            &HostOs::Linux,
            &HostArch::X64,
            "loam",
            "0.9.0",
        )
        .await
        .unwrap();

        assert_eq!(
            config.binary_path,
            Some(PathBuf::from("/home/dev/.loam/loam"))
        );
        assert_eq!(
            acquirer.requests(),
            vec![AcquireRequest {
                name: "loam".to_string(),
                urls: vec![
                    "https://github.com/loambuild/loam-sdk/releases/download/loam-cli-v0.9.0/loam-cli-v0.9.0-x86_64-unknown-linux-gnu.tar.gz".to_string()
                ],
                install_path: Some(PathBuf::from("/home/dev/.loam/loam")),
            }]
        );
        assert_eq!(handle.path(), Path::new("/home/dev/.loam/loam"));
    }

    #[tokio::test]
    async fn artifact_url_is_tried_first() {
        let acquirer = RecordingAcquirer::default();
        let mut config = home_config();
        config.artifact_url = Some("https://mirror.example/loam.tar.gz".to_string());

        get_binary_on(
            &acquirer,
            &mut config,
            &HostOs::Darwin,
            &HostArch::Arm64,
            "loam",
            "1.2.3",
        )
        .await
        .unwrap();

        let urls = &acquirer.requests()[0].urls;
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://mirror.example/loam.tar.gz");
        assert!(urls[1].ends_with("loam-cli-v1.2.3-aarch64-apple-darwin.tar.gz"));
    }

    #[tokio::test]
    async fn explicit_bin_path_is_not_overwritten() {
        let acquirer = RecordingAcquirer::default();
        let mut config = home_config();
        config.bin_path = Some(PathBuf::from("/opt/bin/loam"));

        acquire(&acquirer, &mut config, "loam", vec!["https://a.example".into()])
            .await
            .unwrap();

        assert_eq!(config.binary_path, None);
        assert_eq!(
            acquirer.requests()[0].install_path,
            Some(PathBuf::from("/opt/bin/loam"))
        );
    }

    #[tokio::test]
    async fn repeated_handoff_writes_same_path() {
        let acquirer = RecordingAcquirer::default();
        let mut config = home_config();

        for _ in 0..2 {
            acquire(&acquirer, &mut config, "loam", vec!["https://a.example".into()])
                .await
                .unwrap();
        }

        let requests = acquirer.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(
            config.binary_path,
            Some(PathBuf::from("/home/dev/.loam/loam"))
        );
    }

    #[tokio::test]
    async fn unsupported_platform_never_reaches_acquirer() {
        let acquirer = RecordingAcquirer::default();
        let mut config = home_config();

        let err = get_binary_on(
            &acquirer,
            &mut config,
            &HostOs::parse("FreeBSD"),
            &HostArch::X64,
            "loam",
            "0.9.0",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GetBinaryError::UnsupportedPlatform(_)));
        assert_eq!(err.to_string(), "Unsupported platform: FreeBSD x64");
        assert!(acquirer.requests().is_empty());
        assert_eq!(config.binary_path, None);
    }

    #[tokio::test]
    async fn acquisition_failure_is_forwarded() {
        let acquirer = RecordingAcquirer::failing();
        let mut config = home_config();

        let err = acquire(&acquirer, &mut config, "loam", vec!["https://a.example".into()])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AcquisitionError::BinaryNotFound { ref name } if name == "loam"
        ));
        assert_eq!(acquirer.requests().len(), 1);
    }

    #[test]
    fn all_failed_lists_every_attempt() {
        let err = AcquisitionError::AllCandidatesFailed {
            name: "loam".to_string(),
            attempts: vec![
                FailedAttempt {
                    url: "https://a.example".to_string(),
                    reason: "404".to_string(),
                },
                FailedAttempt {
                    url: "https://b.example".to_string(),
                    reason: "timeout".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Failed to download `loam` from any source:\n  https://a.example: 404\n  https://b.example: timeout"
        );
    }
}
