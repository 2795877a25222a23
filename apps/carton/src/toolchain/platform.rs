//! Platform detection for the carton toolchain.
//!
//! Prebuilt SwiftWasm toolchains are published for two platform families.
//! Each family carries an ordered table of substrings used to recognise its
//! release assets by download URL.
//!
//! ## Supported Platforms
//!
//! - Linux (`linux`, `ubuntu18.04` assets)
//! - macOS (`osx`, `catalina` assets)

use std::fmt;

use crate::errors::{CartonError, Result};

/// A platform family that has prebuilt toolchain archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux distributions (Ubuntu builds).
    Linux,
    /// macOS.
    MacOs,
}

impl Platform {
    /// Every supported platform with its asset suffix table, in lookup order.
    const ASSET_SUFFIXES: [(Self, &'static [&'static str]); 2] = [
        (Self::Linux, &["linux", "ubuntu18.04"]),
        (Self::MacOs, &["osx", "catalina"]),
    ];

    /// Detects the current platform based on compile-time configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CartonError::UnsupportedPlatform`] on any OS other than
    /// Linux or macOS.
    pub fn detect() -> Result<Self> {
        #[cfg(target_os = "linux")]
        {
            return Ok(Self::Linux);
        }

        #[cfg(target_os = "macos")]
        {
            return Ok(Self::MacOs);
        }

        #[allow(unreachable_code)]
        {
            Err(CartonError::UnsupportedPlatform {
                os: std::env::consts::OS,
                arch: std::env::consts::ARCH,
            })
        }
    }

    /// Returns the substrings that identify this platform's release assets.
    #[must_use]
    pub fn asset_suffixes(self) -> &'static [&'static str] {
        Self::ASSET_SUFFIXES
            .iter()
            .find(|(platform, _)| *platform == self)
            .map_or(&[], |(_, suffixes)| *suffixes)
    }

    /// Returns `true` when `url` names an asset built for this platform.
    #[must_use]
    pub fn matches_asset(self, url: &str) -> bool {
        self.asset_suffixes()
            .iter()
            .any(|suffix| url.contains(suffix))
    }

    /// Returns the platform identifier string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
