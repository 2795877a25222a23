//! Install command for the carton CLI.
//!
//! Resolves a toolchain version, reuses an installed copy when one exists,
//! and otherwise downloads and unpacks it into `~/.carton/sdk`.
//!
//! ## Usage
//!
//! ```bash
//! carton sdk install                      # Version from .swift-version or default
//! carton sdk install wasm-5.3.1-RELEASE   # Specific version
//! carton sdk install https://example.com/swift-wasm-5.3.1-RELEASE-ubuntu18.04.tar.gz
//! ```

use anyhow::{Context, Result};
use clap::Args;

use crate::toolchain::InstallationOrchestrator;
use crate::toolchain::progress::{silent_progress, terminal_progress};

/// Arguments for the install command.
#[derive(Args)]
pub struct InstallArgs {
    /// Version to install, or a direct archive URL.
    ///
    /// If omitted, the version is read from `.swift-version` in the current
    /// directory, falling back to the default toolchain.
    pub version: Option<String>,
}

/// Executes the install command.
///
/// # Process
///
/// 1. Resolve the version from the argument, project file or default
/// 2. Look for an installed copy in `~/.swiftenv/versions` then `~/.carton/sdk`
/// 3. If none is found, locate the release asset for this platform
/// 4. Download and extract it into `~/.carton/sdk`
///
/// # Errors
///
/// Returns an error if:
/// - The current directory cannot be determined
/// - The platform is unsupported
/// - No download URL exists for the version
/// - Download or extraction fails
pub async fn execute(args: &InstallArgs, quiet: bool) -> Result<()> {
    let project_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let progress = if quiet {
        silent_progress()
    } else {
        terminal_progress()
    };

    let orchestrator = InstallationOrchestrator::from_env(project_dir, progress)?;
    let (path, version) = orchestrator
        .resolve_installed_toolchain(args.version.as_deref())
        .await
        .context("Failed to install toolchain")?;

    println!("Toolchain {version} is available at {}", path.display());
    Ok(())
}
