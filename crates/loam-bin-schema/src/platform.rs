//! Host platform detection and target triple resolution.
//!
//! Release artifacts are named after a Rust-style target triple
//! (`x86_64-unknown-linux-gnu`, `aarch64-apple-darwin`, ...). The host is
//! described by the raw OS type and CPU architecture names a JavaScript
//! runtime reports (`Linux`, `Darwin`, `Windows_NT` and `x64`, `arm64`), and
//! only a fixed set of those pairs has a published build.
//!
//! # Example
//!
//! ```
//! use loam_bin_schema::{Arch, Platform, resolve};
//!
//! let target = resolve("Linux", "x64").unwrap();
//! assert_eq!(target.arch(), Arch::X86_64);
//! assert_eq!(target.platform(), Platform::UnknownLinuxGnu);
//! assert_eq!(target.to_string(), "x86_64-unknown-linux-gnu");
//!
//! let err = resolve("SunOS", "x64").unwrap_err();
//! assert_eq!(err.to_string(), "Unsupported platform: SunOS x64");
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The host has no published build.
///
/// Carries the raw, unmapped OS and architecture names so the message can be
/// used verbatim in a bug report or a request for a new build target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported platform: {os} {arch}")]
pub struct UnsupportedPlatformError {
    /// Raw OS type name (e.g. `FreeBSD`).
    pub os: String,
    /// Raw CPU architecture name (e.g. `ia32`).
    pub arch: String,
}

/// Operating system as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    /// macOS (`Darwin`).
    Darwin,
    /// Linux (`Linux`).
    Linux,
    /// Windows (`Windows_NT`).
    WindowsNt,
    /// Anything else, kept verbatim.
    Other(String),
}

impl HostOs {
    /// Parse a raw OS type name. Unknown names are kept as [`HostOs::Other`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Darwin" => Self::Darwin,
            "Linux" => Self::Linux,
            "Windows_NT" => Self::WindowsNt,
            other => Self::Other(other.to_string()),
        }
    }

    /// Detect the OS this process was compiled for.
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::OS)
    }

    /// Convert a `std::env::consts::OS` value, spelling it the way the host
    /// report would (`freebsd` becomes `FreeBSD`).
    pub fn from_rust_name(os: &str) -> Self {
        match os {
            "macos" => Self::Darwin,
            "linux" => Self::Linux,
            "windows" => Self::WindowsNt,
            "freebsd" => Self::Other("FreeBSD".to_string()),
            "openbsd" => Self::Other("OpenBSD".to_string()),
            "netbsd" => Self::Other("NetBSD".to_string()),
            "dragonfly" => Self::Other("DragonFly".to_string()),
            "solaris" | "illumos" => Self::Other("SunOS".to_string()),
            "aix" => Self::Other("AIX".to_string()),
            "android" => Self::Other("Android".to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw name, as it would appear in the host report.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Darwin => "Darwin",
            Self::Linux => "Linux",
            Self::WindowsNt => "Windows_NT",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostArch {
    /// 64-bit x86 (`x64`).
    X64,
    /// 64-bit ARM (`arm64`).
    Arm64,
    /// Anything else, kept verbatim.
    Other(String),
}

impl HostArch {
    /// Parse a raw architecture name. Unknown names are kept as [`HostArch::Other`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "x64" => Self::X64,
            "arm64" => Self::Arm64,
            other => Self::Other(other.to_string()),
        }
    }

    /// Detect the architecture this process was compiled for.
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::ARCH)
    }

    /// Convert a `std::env::consts::ARCH` value, spelling it the way the host
    /// report would (`x86` becomes `ia32`).
    pub fn from_rust_name(arch: &str) -> Self {
        match arch {
            "x86_64" => Self::X64,
            "aarch64" => Self::Arm64,
            "x86" => Self::Other("ia32".to_string()),
            "powerpc" => Self::Other("ppc".to_string()),
            "powerpc64" => Self::Other("ppc64".to_string()),
            "loongarch64" => Self::Other("loong64".to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw name, as it would appear in the host report.
    pub fn as_str(&self) -> &str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor/OS/ABI suffix of a target triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    /// `apple-darwin`
    #[serde(rename = "apple-darwin")]
    AppleDarwin,
    /// `unknown-linux-gnu`
    #[serde(rename = "unknown-linux-gnu")]
    UnknownLinuxGnu,
    /// `pc-windows-msvc`
    #[serde(rename = "pc-windows-msvc")]
    PcWindowsMsvc,
}

impl Platform {
    /// Map a host OS onto a published platform, if there is one.
    pub fn from_host(os: &HostOs) -> Option<Self> {
        match os {
            HostOs::Darwin => Some(Self::AppleDarwin),
            HostOs::Linux => Some(Self::UnknownLinuxGnu),
            HostOs::WindowsNt => Some(Self::PcWindowsMsvc),
            HostOs::Other(_) => None,
        }
    }

    /// Triple suffix used in artifact names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppleDarwin => "apple-darwin",
            Self::UnknownLinuxGnu => "unknown-linux-gnu",
            Self::PcWindowsMsvc => "pc-windows-msvc",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Architecture prefix of a target triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    /// `x86_64`
    #[serde(rename = "x86_64")]
    X86_64,
    /// `aarch64`
    #[serde(rename = "aarch64")]
    Aarch64,
}

impl Arch {
    /// Map a host architecture onto a published one, if there is one.
    pub fn from_host(arch: &HostArch) -> Option<Self> {
        match arch {
            HostArch::X64 => Some(Self::X86_64),
            HostArch::Arm64 => Some(Self::Aarch64),
            HostArch::Other(_) => None,
        }
    }

    /// Rust-convention architecture name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported `(arch, platform)` pair.
///
/// Only obtainable through [`Target::from_host`], [`resolve`] or
/// [`resolve_target`], so every value names a published build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Target {
    arch: Arch,
    platform: Platform,
}

impl Target {
    /// Resolve a host description. Both halves must map.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedPlatformError`] with the raw names when either the
    /// OS or the architecture has no published build.
    pub fn from_host(os: &HostOs, arch: &HostArch) -> Result<Self, UnsupportedPlatformError> {
        match (Arch::from_host(arch), Platform::from_host(os)) {
            (Some(arch), Some(platform)) => Ok(Self { arch, platform }),
            _ => Err(UnsupportedPlatformError {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    /// CPU architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// OS convention.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The full triple, e.g. `aarch64-apple-darwin`.
    pub fn triple(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.arch, self.platform)
    }
}

/// Resolve raw OS type and architecture names.
///
/// # Errors
///
/// See [`Target::from_host`].
pub fn resolve(os: &str, arch: &str) -> Result<Target, UnsupportedPlatformError> {
    Target::from_host(&HostOs::parse(os), &HostArch::parse(arch))
}

/// Resolve the target of the running host.
///
/// # Errors
///
/// See [`Target::from_host`].
pub fn resolve_target() -> Result<Target, UnsupportedPlatformError> {
    Target::from_host(&HostOs::current(), &HostArch::current())
}
