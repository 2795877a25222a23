//! SDK command for the carton CLI.
//!
//! Groups the toolchain management subcommands.
//!
//! ## Usage
//!
//! ```bash
//! carton sdk install              # Install the project's toolchain
//! carton sdk install 5.3-RELEASE  # Install a specific version
//! carton sdk versions             # List installed toolchains
//! carton sdk local wasm-5.3.1-RELEASE
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{install, local, versions};

/// Arguments for the sdk command.
#[derive(Args)]
pub struct SdkArgs {
    #[command(subcommand)]
    pub command: SdkCommand,
}

/// Subcommands for toolchain management.
#[derive(Subcommand)]
pub enum SdkCommand {
    /// Install a toolchain, or report the one already installed.
    ///
    /// The version is taken from the argument, or from `.swift-version` in
    /// the current directory, or falls back to the default toolchain.
    Install(install::InstallArgs),

    /// List installed toolchain versions.
    ///
    /// The version the current project resolves to is marked with `*`.
    Versions,

    /// Pin the toolchain version for the current directory.
    ///
    /// Writes the version to `.swift-version`.
    Local(local::LocalArgs),
}

/// Executes the sdk command.
///
/// # Errors
///
/// Returns an error if the subcommand fails.
pub async fn execute(args: &SdkArgs, quiet: bool) -> Result<()> {
    match &args.command {
        SdkCommand::Install(args) => install::execute(args, quiet).await,
        SdkCommand::Versions => versions::execute(),
        SdkCommand::Local(args) => local::execute(args),
    }
}
