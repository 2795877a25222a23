//! Release asset lookup for the carton toolchain.
//!
//! Toolchain archives are attached to SwiftWasm GitHub releases tagged
//! `swift-<version>`. The release is fetched from the releases API and the
//! first asset whose download URL carries one of the platform's suffixes is
//! selected.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "assets": [
//!     {
//!       "name": "swift-wasm-5.3.1-RELEASE-ubuntu18.04_x86_64.tar.gz",
//!       "browser_download_url": "https://github.com/swiftwasm/swift/releases/download/..."
//!     }
//!   ]
//! }
//! ```
//!
//! The API host can be overridden with the `CARTON_RELEASE_API` environment
//! variable for testing or using a mirror.

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use super::Platform;
use crate::errors::{CartonError, Result};

/// Environment variable to override the release API base URL.
pub const RELEASE_API_ENV: &str = "CARTON_RELEASE_API";

/// Default release API base URL.
const DEFAULT_RELEASE_API: &str = "https://api.github.com";

/// Path to tagged releases of the SwiftWasm toolchain.
const RELEASES_PATH: &str = "/repos/swiftwasm/swift/releases/tags";

/// Release tags are `<prefix>-<version>`.
const TAG_PREFIX: &str = "swift";

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Statuses meaning the API refused to answer rather than that the release
/// does not exist: unauthorized, forbidden (GitHub rate limit) and too many
/// requests.
const REJECTED_STATUSES: [u16; 3] = [401, 403, 429];

/// User-Agent header for HTTP requests.
pub(crate) const USER_AGENT: &str = "carton";

/// A tagged release. Only the assets are of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Downloadable files attached to the release.
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// Asset file name.
    pub name: String,
    /// Direct download URL.
    pub browser_download_url: Url,
}

/// Picks the first asset built for `platform`, in release order.
#[must_use]
pub fn select_asset(assets: &[ReleaseAsset], platform: Platform) -> Option<&ReleaseAsset> {
    assets
        .iter()
        .find(|asset| platform.matches_asset(asset.browser_download_url.as_str()))
}

/// Client for the release listing API.
#[derive(Debug, Clone)]
pub struct ReleaseLocator {
    client: reqwest::Client,
    api_base: String,
}

impl ReleaseLocator {
    /// Creates a locator for `CARTON_RELEASE_API`, or the GitHub API.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let api_base = std::env::var(RELEASE_API_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RELEASE_API.to_string());
        Self::with_api_base(&api_base)
    }

    /// Creates a locator for a specific API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_base(api_base: &str) -> Result<Self> {
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CartonError::network(&api_base, e))?;
        Ok(Self { client, api_base })
    }

    /// Returns the release lookup URL for `version`.
    #[must_use]
    pub fn release_url(&self, version: &str) -> String {
        format!("{}{RELEASES_PATH}/{TAG_PREFIX}-{version}", self.api_base)
    }

    /// Finds the download URL of the archive for `version` on `platform`.
    ///
    /// Returns `Ok(None)` when the release does not exist, the response
    /// is empty, or no asset matches the platform.
    ///
    /// # Errors
    ///
    /// Returns [`CartonError::Network`] if the request fails,
    /// [`CartonError::ReleaseLookupRejected`] on 401, 403 or 429, and
    /// [`CartonError::AssetDecodeFailure`] if the body is not a release.
    pub async fn locate_asset(&self, version: &str, platform: Platform) -> Result<Option<Url>> {
        let url = self.release_url(version);
        debug!(%url, "fetching release");

        let mut request = self.client.get(&url);
        if let Some(token) = api_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CartonError::network(&url, e))?;

        let status = response.status();
        if REJECTED_STATUSES.contains(&status.as_u16()) {
            return Err(CartonError::release_lookup_rejected(url, status.as_u16()));
        }
        if !status.is_success() {
            warn!(%url, "release lookup for {version} failed with status {status}");
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CartonError::network(&url, e))?;
        if body.is_empty() {
            debug!(%url, "release lookup returned an empty body");
            return Ok(None);
        }

        let release: Release = serde_json::from_slice(&body)
            .map_err(|source| CartonError::AssetDecodeFailure { source })?;

        let selected = select_asset(&release.assets, platform).map(|asset| {
            info!(asset = %asset.name, "selected release asset for {platform}");
            asset.browser_download_url.clone()
        });
        Ok(selected)
    }
}

/// Optional API token, raising the anonymous rate limit.
fn api_token() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|t| !t.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, url: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            browser_download_url: Url::parse(url).unwrap(),
        }
    }

    fn release_json() -> String {
        r#"{
            "tag_name": "swift-5.3",
            "assets": [
                {
                    "name": "swift-5.3-macos.tar.gz",
                    "browser_download_url": "https://example.com/swift-5.3-osx.tar.gz",
                    "size": 10
                },
                {
                    "name": "swift-5.3-linux.tar.gz",
                    "browser_download_url": "https://example.com/swift-5.3-linux.tar.gz",
                    "size": 11
                }
            ]
        }"#
        .to_string()
    }

    #[test]
    fn release_url_uses_tag_prefix() {
        let locator = ReleaseLocator::with_api_base("https://api.example.com/").unwrap();
        assert_eq!(
            locator.release_url("wasm-5.3.1-RELEASE"),
            "https://api.example.com/repos/swiftwasm/swift/releases/tags/swift-wasm-5.3.1-RELEASE"
        );
    }

    #[test]
    fn select_asset_returns_first_match_in_order() {
        let assets = vec![
            asset("a", "https://x/swift-5.3-catalina.tar.gz"),
            asset("b", "https://x/swift-5.3-ubuntu18.04.tar.gz"),
            asset("c", "https://x/swift-5.3-linux.tar.gz"),
        ];
        assert_eq!(select_asset(&assets, Platform::Linux).map(|a| a.name.as_str()), Some("b"));
        assert_eq!(select_asset(&assets, Platform::MacOs).map(|a| a.name.as_str()), Some("a"));
    }

    #[test]
    fn select_asset_returns_none_without_match() {
        let assets = vec![asset("a", "https://x/swift-5.3-windows.zip")];
        assert!(select_asset(&assets, Platform::Linux).is_none());
        assert!(select_asset(&[], Platform::MacOs).is_none());
    }

    #[tokio::test]
    async fn locate_asset_selects_platform_asset() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-5.3")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(release_json())
            .expect(2)
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        let linux = locator.locate_asset("5.3", Platform::Linux).await.unwrap();
        let macos = locator.locate_asset("5.3", Platform::MacOs).await.unwrap();

        assert_eq!(
            linux.as_ref().map(Url::as_str),
            Some("https://example.com/swift-5.3-linux.tar.gz")
        );
        assert_eq!(
            macos.as_ref().map(Url::as_str),
            Some("https://example.com/swift-5.3-osx.tar.gz")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn locate_asset_empty_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-5.3")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        assert_eq!(locator.locate_asset("5.3", Platform::Linux).await.unwrap(), None);
    }

    #[tokio::test]
    async fn locate_asset_missing_release_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-9.9")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        assert_eq!(locator.locate_asset("9.9", Platform::Linux).await.unwrap(), None);
    }

    #[tokio::test]
    async fn locate_asset_rate_limit_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-5.3")
            .with_status(403)
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        let err = locator
            .locate_asset("5.3", Platform::Linux)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CartonError::ReleaseLookupRejected { code: 403, .. }
        ));
    }

    #[tokio::test]
    async fn locate_asset_malformed_body_is_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-5.3")
            .with_status(200)
            .with_body(r#"{"assets": "not a list"}"#)
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        let err = locator
            .locate_asset("5.3", Platform::Linux)
            .await
            .unwrap_err();
        assert!(matches!(err, CartonError::AssetDecodeFailure { .. }));
    }

    #[tokio::test]
    async fn locate_asset_without_platform_match_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/swiftwasm/swift/releases/tags/swift-5.3")
            .with_status(200)
            .with_body(
                r#"{"assets": [{"name": "w.zip", "browser_download_url": "https://x/w-windows.zip"}]}"#,
            )
            .create_async()
            .await;

        let locator = ReleaseLocator::with_api_base(&server.url()).unwrap();
        assert_eq!(locator.locate_asset("5.3", Platform::Linux).await.unwrap(), None);
    }
}
