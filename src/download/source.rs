//! Remote content source abstraction used by the synchronizer.

use std::path::Path;

use async_trait::async_trait;

use super::{DownloadError, HttpClient};

/// Where manifests and artifacts come from.
///
/// This trait uses `async_trait` so the synchronizer can hold a
/// `Box<dyn ArtifactSource>`; native async trait methods are not object-safe.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetches a small text resource such as a checksum manifest.
    async fn fetch_text(&self, url: &str) -> Result<String, DownloadError>;

    /// Downloads `url` to `destination`, replacing it atomically on success
    /// and leaving no partial file on failure. Returns bytes written.
    async fn download_file(&self, url: &str, destination: &Path) -> Result<u64, DownloadError>;
}

#[async_trait]
impl ArtifactSource for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        HttpClient::fetch_text(self, url).await
    }

    async fn download_file(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        HttpClient::download_file(self, url, destination).await
    }
}
