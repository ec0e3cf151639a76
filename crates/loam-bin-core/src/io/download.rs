//! Default acquisition service: download a `.tar.gz` release and install its executable.
//!
//! The response body is streamed through a gzip decoder straight into a tar
//! unpacker, so the archive is never written to disk as a whole. Extraction
//! happens in a temporary directory next to the install path, which keeps the
//! final move on a single filesystem.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_compression::tokio::bufread::GzipDecoder;
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;
use tokio_tar::Archive;
use tokio_util::io::StreamReader;
use walkdir::WalkDir;

use crate::acquire::{
    AcquireRequest, Acquirer, AcquisitionError, BinaryHandle, BinarySource, FailedAttempt,
};
use crate::paths::{executable_name, executable_path, filename_from_url};

/// Installs release archives over HTTP.
///
/// Candidate URLs are tried in order; the first one that yields an archive
/// containing the executable wins. A file already present at the install path
/// is returned as-is without touching the network.
#[derive(Debug, Clone, Default)]
pub struct HttpAcquirer {
    client: Client,
}

impl HttpAcquirer {
    /// Acquirer with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, timeouts, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn install_from(
        &self,
        url: &str,
        name: &str,
        install_path: &Path,
    ) -> Result<(), AcquisitionError> {
        let install_dir = install_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        tokio::fs::create_dir_all(install_dir).await?;
        let staging = tempfile::tempdir_in(install_dir)?;

        tracing::debug!("Downloading {}", filename_from_url(url));
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes_stream().map_err(std::io::Error::other);
        let decoder = GzipDecoder::new(StreamReader::new(body));
        Archive::new(decoder).unpack(staging.path()).await?;

        let extracted =
            find_executable(staging.path(), name).ok_or_else(|| AcquisitionError::BinaryNotFound {
                name: name.to_string(),
            })?;

        tokio::fs::rename(&extracted, install_path).await?;
        make_executable(install_path).await?;
        Ok(())
    }
}

#[async_trait]
impl Acquirer for HttpAcquirer {
    async fn create(&self, request: AcquireRequest) -> Result<BinaryHandle, AcquisitionError> {
        let AcquireRequest {
            name,
            urls,
            install_path,
        } = request;
        let install_path = install_path.ok_or(AcquisitionError::NoInstallPath)?;
        let install_path = executable_path(&install_path);

        if tokio::fs::metadata(&install_path)
            .await
            .is_ok_and(|m| m.is_file())
        {
            tracing::debug!("Using cached {name} at {}", install_path.display());
            return Ok(BinaryHandle {
                name,
                path: install_path,
                source: BinarySource::Cached,
            });
        }

        if urls.is_empty() {
            return Err(AcquisitionError::NoCandidates { name });
        }

        let mut attempts = Vec::with_capacity(urls.len());
        for url in urls {
            match self.install_from(&url, &name, &install_path).await {
                Ok(()) => {
                    tracing::info!("Installed {name} to {}", install_path.display());
                    return Ok(BinaryHandle {
                        name,
                        path: install_path,
                        source: BinarySource::Downloaded { url },
                    });
                }
                Err(e) => {
                    tracing::warn!("Failed to install {name} from {url}: {e}");
                    attempts.push(FailedAttempt {
                        url,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(AcquisitionError::AllCandidatesFailed { name, attempts })
    }
}

/// Shallowest regular file named like the tool's executable; ties go to the
/// lexicographically smallest path.
fn find_executable(root: &Path, name: &str) -> Option<PathBuf> {
    let file_name = executable_name(name);
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == OsStr::new(&file_name))
        .min_by_key(|e| (e.depth(), e.path().to_path_buf()))
        .map(walkdir::DirEntry::into_path)
}

async fn make_executable(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = tokio::fs::metadata(path).await?.permissions();
        perms.set_mode(0o755);
        tokio::fs::set_permissions(path, perms).await?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
