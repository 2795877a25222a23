//! Toolchain archive installation.
//!
//! ## Process
//!
//! 1. Ensure the destination root exists
//! 2. Stream the archive to `<root>/<version>.tar.gz` with progress
//! 3. Create `<root>/<version>`
//! 4. Extract the archive into it, stripping the top level directory
//! 5. Remove the archive, whether or not the previous steps succeeded
//!
//! A failed extraction also removes `<root>/<version>`, so a half-unpacked
//! toolchain is never listed as installed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use url::Url;

use super::archive::{TempArchive, extract_tar_gz};
use super::download::{ProgressCallback, download_file_with_callback};
use super::paths::{archive_path, toolchain_dir};
use crate::errors::{CartonError, Result};

/// Downloads and unpacks toolchain archives.
#[derive(Clone)]
pub struct ArchiveInstaller {
    progress: ProgressCallback,
}

impl ArchiveInstaller {
    /// Creates an installer reporting download progress to `progress`.
    #[must_use]
    pub fn new(progress: ProgressCallback) -> Self {
        Self { progress }
    }

    /// Installs the archive at `url` as `<destination_root>/<version>`.
    ///
    /// Returns the directory the toolchain was extracted to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `destination_root` cannot be created ([`CartonError::DirectoryMissing`])
    /// - The download is rejected ([`CartonError::InvalidResponseCode`]) or fails
    /// - Extraction fails ([`CartonError::ExternalProcessFailure`])
    pub async fn install(
        &self,
        version: &str,
        url: &Url,
        destination_root: &Path,
    ) -> Result<PathBuf> {
        ensure_directory(destination_root)?;

        let archive = TempArchive::new(archive_path(destination_root, version));
        info!(%url, "downloading toolchain {version}");
        let downloaded = download_file_with_callback(
            url,
            archive.path(),
            &format!("Downloading {version}"),
            self.progress.clone(),
        )
        .await?;
        debug!(downloaded, archive = %archive.path().display(), "archive downloaded");

        let destination = toolchain_dir(destination_root, version);
        tokio::fs::create_dir_all(&destination).await.map_err(|e| {
            CartonError::io_error(format!("Failed to create {}", destination.display()), e)
        })?;

        info!(destination = %destination.display(), "unpacking toolchain archive");
        match extract_tar_gz(archive.path(), &destination).await {
            Ok(output) => {
                if !output.trim().is_empty() {
                    debug!(output = output.trim(), "tar output");
                }
                Ok(destination)
            }
            Err(e) => {
                remove_partial_install(&destination);
                Err(e)
            }
        }
    }
}

/// Removes a toolchain directory left behind by a failed install.
pub fn remove_partial_install(destination: &Path) {
    match std::fs::remove_dir_all(destination) {
        Ok(()) => debug!(path = %destination.display(), "removed partial toolchain"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %destination.display(), "failed to remove partial toolchain: {e}"),
    }
}

/// Creates `path` if needed and checks that it is a directory.
fn ensure_directory(path: &Path) -> Result<()> {
    if let Err(e) = std::fs::create_dir_all(path) {
        debug!(path = %path.display(), "failed to create directory: {e}");
    }
    if path.is_dir() {
        Ok(())
    } else {
        Err(CartonError::directory_missing(path))
    }
}
