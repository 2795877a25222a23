//! Command modules for the carton CLI.
//!
//! ## Toolchain Commands
//!
//! - [`sdk`] - Dispatches the `sdk` subcommands
//! - [`install`] - Resolve and install a toolchain
//! - [`versions`] - List installed toolchains
//! - [`local`] - Pin the project's toolchain version

pub mod install;
pub mod local;
pub mod sdk;
pub mod versions;
