//! SwiftWasm toolchain management for the carton CLI.
//!
//! This module resolves which toolchain a project needs, finds an installed
//! copy, and downloads and unpacks one when none is present.
//!
//! ## Module Structure
//!
//! - [`platform`] - Platform families and their release asset suffixes
//! - [`paths`] - Installation roots and the layout inside them
//! - [`version`] - Version hint resolution and `.swift-version` handling
//! - [`probe`] - Local toolchain lookup
//! - [`release`] - Release API queries and asset selection
//! - [`download`] - HTTP download with progress tracking
//! - [`progress`] - Terminal rendering of download progress
//! - [`archive`] - Temporary archive guard and tar extraction
//! - [`installer`] - Download, unpack and clean up an archive
//! - [`orchestrator`] - The full resolve, probe and install pipeline
//! - [`process`] - External process helpers

pub mod archive;
pub mod download;
pub mod installer;
pub mod orchestrator;
pub mod paths;
pub mod platform;
pub mod probe;
pub mod process;
pub mod progress;
pub mod release;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::InstallationOrchestrator;
pub use paths::InstallationRoots;
pub use platform::Platform;
pub use version::resolve_version;
