//! Archive handling for the carton toolchain.
//!
//! Toolchain archives are `.tar.gz` files whose entries share a single top
//! level directory. They are unpacked with the system `tar`, stripping that
//! directory so the toolchain lands directly in the destination.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::process::{require_program, run_captured};
use crate::errors::Result;

/// A downloaded archive that is deleted when dropped.
///
/// Holding the archive through this guard removes it on every exit path,
/// including failed downloads and failed extraction.
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    /// Takes ownership of the file at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary archive"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "failed to remove temporary archive: {e}"),
        }
    }
}

/// Extracts a `.tar.gz` archive into `dest_dir`, stripping the top level
/// directory.
///
/// Runs `tar xzf <archive> --strip-components=1 --directory <dest_dir>` and
/// returns its captured output.
///
/// # Errors
///
/// Returns [`crate::errors::CartonError::ExternalProcessFailure`] if `tar`
/// is not installed or exits unsuccessfully.
pub async fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<String> {
    let tar = require_program("tar")?;
    run_captured(
        &tar,
        [
            OsStr::new("xzf"),
            archive_path.as_os_str(),
            OsStr::new("--strip-components=1"),
            OsStr::new("--directory"),
            dest_dir.as_os_str(),
        ],
    )
    .await
}
