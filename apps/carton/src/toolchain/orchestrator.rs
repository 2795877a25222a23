//! Toolchain resolution pipeline.
//!
//! [`InstallationOrchestrator`] ties the pieces together:
//!
//! 1. Resolve the version hint
//! 2. Probe the version manager root, then the SDK root
//! 3. On a miss, use the hinted URL or ask the release API for an asset
//! 4. Install the archive into the SDK root
//! 5. Probe the SDK root again to confirm the install

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::download::ProgressCallback;
use super::installer::{ArchiveInstaller, remove_partial_install};
use super::paths::{InstallationRoots, toolchain_binary};
use super::platform::Platform;
use super::probe::probe;
use super::release::ReleaseLocator;
use super::version::{ResolvedVersion, resolve_version, validate_version};
use crate::errors::{CartonError, Result};

/// Resolves version hints to installed toolchains, installing on demand.
pub struct InstallationOrchestrator {
    roots: InstallationRoots,
    platform: Platform,
    locator: ReleaseLocator,
    project_dir: PathBuf,
    installer: ArchiveInstaller,
}

impl InstallationOrchestrator {
    /// Creates an orchestrator over explicit roots, platform and release API.
    #[must_use]
    pub fn new(
        roots: InstallationRoots,
        platform: Platform,
        locator: ReleaseLocator,
        project_dir: impl Into<PathBuf>,
        progress: ProgressCallback,
    ) -> Self {
        Self {
            roots,
            platform,
            locator,
            project_dir: project_dir.into(),
            installer: ArchiveInstaller::new(progress),
        }
    }

    /// Builds an orchestrator from the environment: `CARTON_HOME`,
    /// `CARTON_RELEASE_API` and the host platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, the
    /// platform is unsupported, or the HTTP client cannot be built.
    pub fn from_env(project_dir: impl Into<PathBuf>, progress: ProgressCallback) -> Result<Self> {
        Ok(Self::new(
            InstallationRoots::new()?,
            Platform::detect()?,
            ReleaseLocator::new()?,
            project_dir,
            progress,
        ))
    }

    /// Returns the driver path and version for `hint`, installing the
    /// toolchain into the SDK root when no root has it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The version is not a single path component ([`CartonError::InvalidVersion`])
    /// - No download URL can be found ([`CartonError::UnresolvedDownloadUrl`])
    /// - Downloading or extracting fails
    /// - The extracted archive has no driver ([`CartonError::InvalidInstallationArchive`])
    /// - A found driver cannot report its version
    pub async fn resolve_installed_toolchain(
        &self,
        hint: Option<&str>,
    ) -> Result<(PathBuf, String)> {
        let ResolvedVersion { version, url } = resolve_version(hint, &self.project_dir);
        validate_version(&version)?;
        debug!(%version, "resolved toolchain version");

        for (kind, root) in self.roots.search_order() {
            if let Some(binary) = probe(&version, &root).await? {
                debug!(?kind, "toolchain already installed");
                return Ok((binary, version));
            }
        }

        let url = match url {
            Some(url) => url,
            None => self
                .locator
                .locate_asset(&version, self.platform)
                .await?
                .ok_or_else(|| CartonError::unresolved_download_url(&version))?,
        };

        let sdk_root = self.roots.sdk_root();
        let destination = self.installer.install(&version, &url, &sdk_root).await?;
        info!(destination = %destination.display(), "installed toolchain {version}");

        match probe(&version, &sdk_root).await? {
            Some(binary) => Ok((binary, version)),
            None => {
                remove_partial_install(&destination);
                Err(CartonError::invalid_installation_archive(toolchain_binary(
                    &sdk_root, &version,
                )))
            }
        }
    }

}

/// Lists the versions present in any installation root, sorted and without
/// duplicates. Roots that do not exist are skipped.
///
/// Only the filesystem is consulted, so listing works without network
/// access or a supported platform.
///
/// # Errors
///
/// Returns an I/O error if an existing root cannot be read.
pub fn list_all_known_versions(roots: &InstallationRoots) -> Result<Vec<String>> {
    let mut versions = BTreeSet::new();
    for (_, root) in roots.search_order() {
        versions.extend(versions_in_root(&root)?);
    }
    Ok(versions.into_iter().collect())
}

/// Names of the toolchain directories directly under `root`.
fn versions_in_root(root: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "installation root does not exist");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(CartonError::io_error(
                format!("Failed to read {}", root.display()),
                e,
            ));
        }
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CartonError::io_error(format!("Failed to read {}", root.display()), e)
        })?;
        if entry.path().is_dir() {
            versions.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(versions)
}
