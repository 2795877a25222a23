#![warn(clippy::pedantic)]

//! # carton
//!
//! The `carton` command resolves, locates and installs SwiftWasm toolchains
//! for a project.
//!
//! ## Subcommands
//!
//! - `sdk install` - Install the toolchain a project needs
//! - `sdk versions` - List installed toolchains
//! - `sdk local` - Pin the toolchain version for a project
//!
//! ## Version Resolution
//!
//! The version comes from, in order:
//!
//! 1. The argument to `sdk install`, either a version or an archive URL
//! 2. The first line of `.swift-version` in the current directory
//! 3. The default toolchain, `wasm-5.3.1-RELEASE`
//!
//! ## Examples
//!
//! Install the project's toolchain:
//! ```bash
//! carton sdk install
//! ```
//!
//! Install from a direct archive URL:
//! ```bash
//! carton sdk install https://github.com/swiftwasm/swift/releases/download/swift-wasm-5.3.1-RELEASE/swift-wasm-5.3.1-RELEASE-ubuntu18.04_x86_64.tar.gz
//! ```

mod commands;
mod errors;
mod logging;
mod toolchain;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::sdk;

/// SwiftWasm toolchain manager.
///
/// The `carton` command finds the SwiftWasm toolchain a project needs and
/// installs it when missing.
#[derive(Parser)]
#[command(
    name = "carton",
    author,
    version,
    about = "SwiftWasm toolchain resolver and installer",
    long_about = "The 'carton' command resolves which SwiftWasm toolchain a project needs, \
    reuses an installed copy when one exists, and otherwise downloads it from the release host.",
    after_help = "\
TOOLCHAIN RESOLUTION:
    Installed toolchains are searched for in this order:
    1. ~/.swiftenv/versions/VERSION/usr/bin/swift
    2. ~/.carton/sdk/VERSION/usr/bin/swift
    Missing toolchains are installed into ~/.carton/sdk.

ENVIRONMENT VARIABLES:
    CARTON_HOME             Home directory the roots are derived from (default: ~)
    CARTON_RELEASE_API      Release API base URL (default: https://api.github.com)
    CARTON_LOG              Log filter (default: carton=info)
    GITHUB_TOKEN, GH_TOKEN  Token sent to the release API"
)]
pub struct Cli {
    /// Hide the download progress bar and informational logs.
    #[clap(long = "quiet", short = 'q', global = true, action = clap::ArgAction::SetTrue)]
    pub quiet: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the carton CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage SwiftWasm toolchains.
    ///
    /// Installs toolchains, lists installed ones, and pins the version a
    /// project uses.
    Sdk(sdk::SdkArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

/// Prints an error and returns the exit code.
fn handle_error(e: &anyhow::Error) -> i32 {
    eprintln!("Error: {e:?}");
    1
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);

    match cli.command {
        Commands::Sdk(args) => sdk::execute(&args, cli.quiet).await,
    }
}
