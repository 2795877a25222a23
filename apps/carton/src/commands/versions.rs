//! Versions command for the carton CLI.
//!
//! Lists the toolchains found in every installation root.
//!
//! ## Usage
//!
//! ```bash
//! carton sdk versions
//! ```
//!
//! ## Output Format
//!
//! ```text
//! Installed toolchains:
//!   wasm-5.3.0-RELEASE
//! * wasm-5.3.1-RELEASE
//! ```

use anyhow::{Context, Result};

use crate::toolchain::orchestrator::list_all_known_versions;
use crate::toolchain::{InstallationRoots, resolve_version};

/// Executes the versions command.
///
/// The version the current directory resolves to is marked with `*`.
///
/// # Errors
///
/// Returns an error if an installation root cannot be read.
pub fn execute() -> Result<()> {
    let project_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let roots = InstallationRoots::new()?;
    let versions = list_all_known_versions(&roots)?;

    if versions.is_empty() {
        println!("No toolchains installed.");
        println!();
        println!("Run 'carton sdk install' to install the project's toolchain.");
        return Ok(());
    }

    let current = resolve_version(None, &project_dir).version;
    println!("Installed toolchains:");
    for line in format_versions(&versions, &current) {
        println!("{line}");
    }

    Ok(())
}

fn format_versions(versions: &[String], current: &str) -> Vec<String> {
    versions
        .iter()
        .map(|version| {
            let marker = if version == current { "*" } else { " " };
            format!("{marker} {version}")
        })
        .collect()
}
