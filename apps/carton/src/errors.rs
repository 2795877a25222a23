//! Error types for the carton CLI.
//!
//! `CartonError` is the typed error surfaced by the toolchain pipeline. The
//! command layer wraps it in `anyhow::Error` with additional context, and
//! `main` prints it and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the toolchain pipeline.
pub type Result<T, E = CartonError> = std::result::Result<T, E>;

/// Consolidated error type for toolchain resolution and installation.
#[derive(Debug, Error)]
pub enum CartonError {
    /// The SDK root could not be created or is not a directory.
    #[error("directory missing: {path}")]
    DirectoryMissing {
        /// The directory that was expected to exist.
        path: PathBuf,
    },

    /// The archive was extracted but the toolchain binary is not where it should be.
    #[error("invalid installation archive: expected toolchain binary at {path}")]
    InvalidInstallationArchive {
        /// The expected binary location.
        path: PathBuf,
    },

    /// The archive download answered with a non-success status or no content length.
    #[error("invalid response code {code}")]
    InvalidResponseCode {
        /// HTTP status code of the response.
        code: u16,
    },

    /// The release API body was not the expected JSON document.
    #[error("failed to decode release assets: {source}")]
    AssetDecodeFailure {
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The release API refused the lookup (authentication or rate limiting).
    #[error(
        "release lookup at {url} was rejected with status {code}; set GITHUB_TOKEN if rate limited"
    )]
    ReleaseLookupRejected {
        /// The release lookup URL.
        url: String,
        /// HTTP status code of the response.
        code: u16,
    },

    /// The version cannot name a toolchain directory.
    #[error("invalid toolchain version '{version}': versions must be a single path component")]
    InvalidVersion {
        /// The rejected version.
        version: String,
    },

    /// Neither an explicit URL nor a matching release asset was found.
    #[error("no download URL found for toolchain version {version}")]
    UnresolvedDownloadUrl {
        /// The version that could not be resolved to a download.
        version: String,
    },

    /// An external process could not be started or exited unsuccessfully.
    #[error("`{command}` failed{}: {output}", .code.map_or_else(String::new, |c| format!(" with exit code {c}")))]
    ExternalProcessFailure {
        /// The command line that was run.
        command: String,
        /// Exit code, if the process ran to completion.
        code: Option<i32>,
        /// Captured output or the spawn error.
        output: String,
    },

    /// Transport-level HTTP failure.
    #[error("request to {url} failed: {source}")]
    Network {
        /// The requested URL.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Error reading or writing files.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O operation that failed.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The running OS has no prebuilt toolchain.
    #[error("unsupported platform: {os} on {arch}")]
    UnsupportedPlatform {
        /// `std::env::consts::OS`
        os: &'static str,
        /// `std::env::consts::ARCH`
        arch: &'static str,
    },

    /// The user home directory could not be determined.
    #[error("cannot determine home directory, set CARTON_HOME")]
    HomeDirectory,
}

impl CartonError {
    /// Creates a new `DirectoryMissing` error.
    #[must_use]
    pub fn directory_missing(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryMissing { path: path.into() }
    }

    /// Creates a new `InvalidInstallationArchive` error.
    #[must_use]
    pub fn invalid_installation_archive(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInstallationArchive { path: path.into() }
    }

    /// Creates a new `InvalidResponseCode` error.
    #[must_use]
    pub const fn invalid_response_code(code: u16) -> Self {
        Self::InvalidResponseCode { code }
    }

    /// Creates a new `ReleaseLookupRejected` error.
    #[must_use]
    pub fn release_lookup_rejected(url: impl Into<String>, code: u16) -> Self {
        Self::ReleaseLookupRejected {
            url: url.into(),
            code,
        }
    }

    /// Creates a new `InvalidVersion` error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Creates a new `UnresolvedDownloadUrl` error.
    #[must_use]
    pub fn unresolved_download_url(version: impl Into<String>) -> Self {
        Self::UnresolvedDownloadUrl {
            version: version.into(),
        }
    }

    /// Creates a new `ExternalProcessFailure` error.
    #[must_use]
    pub fn external_process(
        command: impl Into<String>,
        code: Option<i32>,
        output: impl Into<String>,
    ) -> Self {
        Self::ExternalProcessFailure {
            command: command.into(),
            code,
            output: output.into(),
        }
    }

    /// Creates a new `Network` error.
    #[must_use]
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a new `Io` error from an I/O error with context.
    #[must_use]
    pub fn io_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_missing_displays_path() {
        let err = CartonError::directory_missing("/home/user/.carton/sdk");
        assert_eq!(err.to_string(), "directory missing: /home/user/.carton/sdk");
    }

    #[test]
    fn invalid_response_code_displays_code() {
        let err = CartonError::invalid_response_code(404);
        assert_eq!(err.to_string(), "invalid response code 404");
    }

    #[test]
    fn unresolved_download_url_displays_version() {
        let err = CartonError::unresolved_download_url("wasm-5.3.1-RELEASE");
        assert_eq!(
            err.to_string(),
            "no download URL found for toolchain version wasm-5.3.1-RELEASE"
        );
    }

    #[test]
    fn release_lookup_rejected_mentions_status_and_token() {
        let err = CartonError::release_lookup_rejected("https://api.github.com/x", 403);
        let message = err.to_string();
        assert!(message.contains("status 403"));
        assert!(message.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn external_process_with_code_displays_code() {
        let err = CartonError::external_process("tar xzf a.tar.gz", Some(2), "not in gzip format");
        assert_eq!(
            err.to_string(),
            "`tar xzf a.tar.gz` failed with exit code 2: not in gzip format"
        );
    }

    #[test]
    fn external_process_without_code_omits_it() {
        let err = CartonError::external_process("tar", None, "not found");
        assert_eq!(err.to_string(), "`tar` failed: not found");
    }

    #[test]
    fn asset_decode_failure_wraps_json_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CartonError::AssetDecodeFailure { source };
        assert!(err.to_string().starts_with("failed to decode release assets"));
    }

    #[test]
    fn invalid_installation_archive_displays_path() {
        let err = CartonError::invalid_installation_archive("/sdk/5.3/usr/bin/swift");
        assert_eq!(
            err.to_string(),
            "invalid installation archive: expected toolchain binary at /sdk/5.3/usr/bin/swift"
        );
    }
}
