//! Local toolchain lookup.
//!
//! A root contains a toolchain for a version when
//! `<root>/<version>/usr/bin/swift` is a regular file. A miss is not an
//! error; the caller moves on to the next root.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::paths::toolchain_binary;
use super::process::run_captured;
use crate::errors::Result;

/// Looks for the toolchain binary for `version` under `root`.
///
/// On a hit the binary's `--version` output is logged.
///
/// # Errors
///
/// Returns [`crate::errors::CartonError::ExternalProcessFailure`] if the
/// found binary cannot report its version.
pub async fn probe(version: &str, root: &Path) -> Result<Option<PathBuf>> {
    let Some(binary) = find_binary(version, root) else {
        debug!(version, root = %root.display(), "toolchain not found in root");
        return Ok(None);
    };

    let reported = run_captured(&binary, ["--version"]).await?;
    info!(
        path = %binary.display(),
        "found toolchain: {}",
        reported.lines().next().unwrap_or_default().trim()
    );

    Ok(Some(binary))
}

/// Returns the expected binary path if it exists as a regular file.
#[must_use]
pub fn find_binary(version: &str, root: &Path) -> Option<PathBuf> {
    let binary = toolchain_binary(root, version);
    binary.is_file().then_some(binary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CartonError;
    use crate::toolchain::test_support::install_fake_toolchain;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn probe_returns_path_of_existing_binary() {
        let temp = TempDir::new().unwrap();
        let expected = install_fake_toolchain(temp.path(), "5.3");

        let found = probe("5.3", temp.path()).await.unwrap();
        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn probe_misses_for_other_version() {
        let temp = TempDir::new().unwrap();
        install_fake_toolchain(temp.path(), "5.3");

        assert_eq!(probe("5.4", temp.path()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn probe_misses_for_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("does-not-exist");
        assert_eq!(probe("5.3", &root).await.unwrap(), None);
    }

    #[tokio::test]
    async fn probe_ignores_directory_in_place_of_binary() {
        let temp = TempDir::new().unwrap();
        temp.child("5.3/usr/bin/swift").create_dir_all().unwrap();
        assert_eq!(probe("5.3", temp.path()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn probe_propagates_failing_version_query() {
        let temp = TempDir::new().unwrap();
        let binary = temp.child("5.3/usr/bin/swift");
        binary.write_str("#!/bin/sh\nexit 1\n").unwrap();
        crate::toolchain::test_support::make_executable(binary.path());

        let err = probe("5.3", temp.path()).await.unwrap_err();
        assert!(matches!(
            err,
            CartonError::ExternalProcessFailure { code: Some(1), .. }
        ));
    }
}
