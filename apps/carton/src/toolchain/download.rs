//! HTTP download functionality for the carton toolchain.
//!
//! Archives are streamed to disk while progress is reported through a
//! [`ProgressCallback`]. The callback only feeds a display; the outcome of
//! the download is the returned `Result`.
//!
//! The response is validated before any bytes are written: the status must
//! be a success and a `Content-Length` header must be present. Otherwise the
//! transfer is abandoned with [`CartonError::InvalidResponseCode`].

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use super::release::USER_AGENT;
use crate::errors::{CartonError, Result};

/// Progress event emitted during downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Response headers were accepted.
    Started {
        /// Total file size in bytes used for progress display.
        total: u64,
    },
    /// Download progress update.
    Progress {
        /// Bytes downloaded so far.
        downloaded: u64,
        /// Total file size in bytes used for progress display.
        total: u64,
        /// What is being downloaded.
        description: String,
    },
    /// Download completed successfully.
    Completed,
    /// Download failed with an error.
    Failed {
        /// Error description.
        error: String,
    },
}

/// Callback type for receiving progress updates during downloads.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Size shown by the progress display when the server reports a zero length.
pub const EXPECTED_ARCHIVE_SIZE: u64 = 891_856_371;

/// Connection timeout in seconds. The body transfer itself is unbounded.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Minimum interval between progress callback invocations in milliseconds.
const PROGRESS_CALLBACK_INTERVAL_MS: u128 = 100;

/// Downloads `url` to `dest`, reporting progress via `callback`.
///
/// Returns the number of bytes written. Emits `Completed` or `Failed`
/// before returning. A partially written `dest` is left for the caller to
/// clean up.
///
/// # Errors
///
/// Returns an error if:
/// - The request fails or the body stream breaks
/// - The response status is not a success, or has no content length
/// - The destination file cannot be written
pub async fn download_file_with_callback(
    url: &Url,
    dest: &Path,
    description: &str,
    callback: ProgressCallback,
) -> Result<u64> {
    match stream_to_file(url, dest, description, &callback).await {
        Ok(downloaded) => {
            callback(ProgressEvent::Completed);
            Ok(downloaded)
        }
        Err(error) => {
            callback(ProgressEvent::Failed {
                error: error.to_string(),
            });
            Err(error)
        }
    }
}

async fn stream_to_file(
    url: &Url,
    dest: &Path,
    description: &str,
    callback: &ProgressCallback,
) -> Result<u64> {
    let client = reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CartonError::network(url.as_str(), e))?;

    debug!(%url, dest = %dest.display(), "starting download");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| CartonError::network(url.as_str(), e))?;

    let status = response.status();
    let Some(content_length) = response.content_length().filter(|_| status.is_success()) else {
        return Err(CartonError::invalid_response_code(status.as_u16()));
    };

    let total = progress_total(content_length);
    callback(ProgressEvent::Started { total });

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| CartonError::io_error(format!("Failed to create {}", dest.display()), e))?;

    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;
    let mut last_callback_time = Instant::now();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| CartonError::network(url.as_str(), e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| CartonError::io_error(format!("Failed to write {}", dest.display()), e))?;
        downloaded += chunk.len() as u64;

        let now = Instant::now();
        if now.duration_since(last_callback_time).as_millis() >= PROGRESS_CALLBACK_INTERVAL_MS {
            callback(ProgressEvent::Progress {
                downloaded,
                total,
                description: description.to_string(),
            });
            last_callback_time = now;
        }
    }

    file.flush()
        .await
        .map_err(|e| CartonError::io_error(format!("Failed to flush {}", dest.display()), e))?;

    callback(ProgressEvent::Progress {
        downloaded,
        total,
        description: description.to_string(),
    });
    debug!(downloaded, dest = %dest.display(), "download finished");

    Ok(downloaded)
}

/// Total used for progress display; a zero length falls back to the
/// expected archive size.
fn progress_total(content_length: u64) -> u64 {
    if content_length == 0 {
        EXPECTED_ARCHIVE_SIZE
    } else {
        content_length
    }
}
