//! Installation root layout for the carton toolchain.
//!
//! Toolchains are searched for under two roots derived from the home
//! directory, in a fixed order. The home directory is the user's home, or
//! `CARTON_HOME` when set.
//!
//! ## Directory Structure
//!
//! ```text
//! ~/.swiftenv/versions/          # Version manager root (read-only)
//!   wasm-5.3.1-RELEASE/
//!     usr/bin/swift
//! ~/.carton/sdk/                 # SDK root (owned by carton)
//!   wasm-5.3.1-RELEASE/
//!     usr/bin/swift
//!   wasm-5.3.1-RELEASE.tar.gz    # Transient download, removed after use
//! ```

use std::path::{Path, PathBuf};

use crate::errors::{CartonError, Result};

/// Environment variable to override the home directory roots are derived from.
pub const CARTON_HOME_ENV: &str = "CARTON_HOME";

/// Name of the toolchain driver binary.
pub const TOOLCHAIN_BINARY: &str = "swift";

/// Location of the driver binary inside an extracted toolchain.
const BINARY_SUBDIR: [&str; 2] = ["usr", "bin"];

/// The kinds of installation root, in probing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// Toolchains managed by `swiftenv`. Probed only.
    VersionManager,
    /// Toolchains installed by carton itself.
    Sdk,
}

impl RootKind {
    /// Probing order. The first root containing a toolchain wins.
    pub const SEARCH_ORDER: [Self; 2] = [Self::VersionManager, Self::Sdk];

    /// Path of this root relative to the home directory.
    #[must_use]
    pub fn relative_path(self) -> &'static [&'static str] {
        match self {
            Self::VersionManager => &[".swiftenv", "versions"],
            Self::Sdk => &[".carton", "sdk"],
        }
    }
}

/// Resolves installation roots and the paths inside them.
#[derive(Debug, Clone)]
pub struct InstallationRoots {
    home: PathBuf,
}

impl InstallationRoots {
    /// Creates roots under `CARTON_HOME`, or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`CartonError::HomeDirectory`] if neither is available.
    pub fn new() -> Result<Self> {
        let home = match std::env::var_os(CARTON_HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::home_dir().ok_or(CartonError::HomeDirectory)?,
        };
        Ok(Self::under_home(home))
    }

    /// Creates roots under a specific home directory.
    #[must_use]
    pub fn under_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Returns the path of a root.
    #[must_use]
    pub fn root(&self, kind: RootKind) -> PathBuf {
        kind.relative_path()
            .iter()
            .fold(self.home.clone(), |path, segment| path.join(segment))
    }

    /// Returns every root in probing order.
    #[must_use]
    pub fn search_order(&self) -> Vec<(RootKind, PathBuf)> {
        RootKind::SEARCH_ORDER
            .iter()
            .map(|&kind| (kind, self.root(kind)))
            .collect()
    }

    /// The root carton installs into.
    #[must_use]
    pub fn sdk_root(&self) -> PathBuf {
        self.root(RootKind::Sdk)
    }
}

/// Returns `<root>/<version>`.
#[must_use]
pub fn toolchain_dir(root: &Path, version: &str) -> PathBuf {
    root.join(version)
}

/// Returns `<root>/<version>/usr/bin/swift`.
#[must_use]
pub fn toolchain_binary(root: &Path, version: &str) -> PathBuf {
    BINARY_SUBDIR
        .iter()
        .fold(toolchain_dir(root, version), |path, segment| {
            path.join(segment)
        })
        .join(TOOLCHAIN_BINARY)
}

/// Returns the transient archive path `<root>/<version>.tar.gz`.
#[must_use]
pub fn archive_path(root: &Path, version: &str) -> PathBuf {
    root.join(format!("{version}.tar.gz"))
}
