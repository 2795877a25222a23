//! Toolchain version resolution.
//!
//! A version hint given on the command line is either a toolchain version,
//! a direct archive URL, or absent. Absent hints defer to the project's
//! `.swift-version` file, and finally to [`DEFAULT_VERSION`]. Resolution
//! never fails.
//!
//! ## Examples
//!
//! ```text
//! wasm-5.3.1-RELEASE                                  -> wasm-5.3.1-RELEASE
//! https://host/swift-wasm-5.3.1-RELEASE-osx.tar.gz    -> wasm-5.3.1-RELEASE (+ URL)
//! (none, .swift-version = "wasm-5.3-SNAPSHOT")        -> wasm-5.3-SNAPSHOT
//! (none, no .swift-version)                           -> wasm-5.3.1-RELEASE
//! ```

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::{CartonError, Result};

/// Version used when nothing else selects one.
pub const DEFAULT_VERSION: &str = "wasm-5.3.1-RELEASE";

/// Project file declaring the toolchain version.
pub const VERSION_FILE: &str = ".swift-version";

/// Substring a `.swift-version` line must contain to name a SwiftWasm toolchain.
pub const VERSION_MARKER: &str = "wasm";

/// `[swift-]<version>-<platform tag>.tar.gz`
static ARCHIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:swift-)?(.+)-[^-]+\.tar\.gz$").expect("archive name regex compiles")
});

/// A version identifier, plus the archive URL when the hint was one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// Canonical version identifier, never empty.
    pub version: String,
    /// Direct download URL taken from the hint.
    pub url: Option<Url>,
}

/// Returns the hint as a URL if it is an absolute `http`/`https` URL.
#[must_use]
pub fn parse_download_url(hint: &str) -> Option<Url> {
    Url::parse(hint)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Extracts the version from an archive URL's file name.
#[must_use]
pub fn version_from_url(url: &Url) -> Option<String> {
    let file_name = url.path_segments()?.next_back()?;
    ARCHIVE_NAME
        .captures(file_name)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolves a version hint into a version identifier.
///
/// `project_dir` is where `.swift-version` is looked up, normally the
/// current directory.
#[must_use]
pub fn resolve_version(hint: Option<&str>, project_dir: &Path) -> ResolvedVersion {
    let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) else {
        return ResolvedVersion {
            version: project_version(project_dir),
            url: None,
        };
    };

    if let Some(url) = parse_download_url(hint) {
        let version = if let Some(version) = version_from_url(&url) {
            info!(%version, "inferred toolchain version from download URL");
            version
        } else {
            warn!(%url, "could not infer a toolchain version from the download URL");
            project_version(project_dir)
        };
        return ResolvedVersion {
            version,
            url: Some(url),
        };
    }

    ResolvedVersion {
        version: hint.to_string(),
        url: None,
    }
}

/// Reads the version declared by the project, or falls back to the default.
fn project_version(project_dir: &Path) -> String {
    let path = project_dir.join(VERSION_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        debug!(path = %path.display(), "no project version file, using default");
        return DEFAULT_VERSION.to_string();
    };

    match content.lines().next().map(str::trim) {
        Some(line) if line.contains(VERSION_MARKER) => line.to_string(),
        _ => {
            warn!(
                path = %path.display(),
                "project version file does not name a SwiftWasm toolchain, using {DEFAULT_VERSION}"
            );
            DEFAULT_VERSION.to_string()
        }
    }
}

/// Checks that `version` can be used as a directory name under an
/// installation root.
///
/// # Errors
///
/// Returns [`CartonError::InvalidVersion`] for empty versions, `.` and `..`,
/// and anything containing a path separator.
pub fn validate_version(version: &str) -> Result<()> {
    let mut components = Path::new(version).components();
    let single_component = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == OsStr::new(version)
    );
    if single_component && !version.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(CartonError::invalid_version(version))
    }
}

/// Writes `version` to the project's `.swift-version` file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_project_version(project_dir: &Path, version: &str) -> Result<PathBuf> {
    let path = project_dir.join(VERSION_FILE);
    std::fs::write(&path, format!("{version}\n"))
        .map_err(|e| CartonError::io_error(format!("Failed to write {}", path.display()), e))?;
    Ok(path)
}
