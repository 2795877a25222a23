//! Local command for the carton CLI.
//!
//! Pins the toolchain version for the current directory by writing
//! `.swift-version`.
//!
//! ## Usage
//!
//! ```bash
//! carton sdk local wasm-5.3.1-RELEASE
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::toolchain::version::{VERSION_MARKER, validate_version, write_project_version};

/// Arguments for the local command.
#[derive(Args)]
pub struct LocalArgs {
    /// Toolchain version to pin (e.g., "wasm-5.3.1-RELEASE").
    pub version: String,
}

/// Executes the local command.
///
/// # Errors
///
/// Returns an error if:
/// - The version is not a single path component
/// - The version does not name a SwiftWasm toolchain
/// - `.swift-version` cannot be written
pub fn execute(args: &LocalArgs) -> Result<()> {
    let version = args.version.trim();
    validate_version(version)?;
    if !version.contains(VERSION_MARKER) {
        bail!(
            "'{version}' is not a SwiftWasm toolchain version; versions in .swift-version must contain '{VERSION_MARKER}'"
        );
    }

    let project_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let path = write_project_version(&project_dir, version)?;
    println!("Pinned toolchain {version} in {}", path.display());
    Ok(())
}
