use std::path::{Path, PathBuf};

/// Returns the user's home directory, or None if it cannot be resolved.
pub fn try_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Default install location for a tool: `<home>/.<name>/<name>`.
pub fn default_binary_path(home: &Path, name: &str) -> PathBuf {
    home.join(format!(".{name}")).join(name)
}

/// File name of the tool's executable inside a release archive.
pub fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Path the executable is installed and spawned from.
///
/// Windows only runs files with an extension, so an extensionless install
/// path gets `.exe` appended there. Elsewhere the path is returned unchanged.
pub fn executable_path(install_path: &Path) -> PathBuf {
    if cfg!(windows) && install_path.extension().is_none() {
        install_path.with_extension("exe")
    } else {
        install_path.to_path_buf()
    }
}

/// Extract the filename from a URL.
pub fn filename_from_url(url: &str) -> &str {
    url.split('/').next_back().unwrap_or("")
}
