//! HTTP client wrapper for manifest fetches and artifact downloads.
//!
//! This module provides the `HttpClient` struct, which streams artifact bodies
//! into a temp file beside the destination and renames it into place only once
//! the body has been fully written.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for fetching checksum manifests and downloading artifacts.
///
/// Create it once and reuse it for a whole run to benefit from connection
/// pooling.
///
/// # Example
///
/// ```no_run
/// use image_sync_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let manifest = client.fetch_text("https://example.test/bookworm/SHA256SUMS").await?;
/// let bytes = client
///     .download_file("https://example.test/bookworm/disk.img", Path::new("images/disk.img"))
///     .await?;
/// println!("{} manifest bytes, {bytes} image bytes", manifest.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with transport-default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client =
            build_client().expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a text resource, decoding it with the response charset
    /// (UTF-8 when none is declared).
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the URL is invalid, the request fails, or
    /// the server answers with a non-success status.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.send_request(url).await?;
        let text = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = text.len(), "text fetched");
        Ok(text)
    }

    /// Downloads `url` to `destination`.
    ///
    /// The parent directory is created if needed. The body is streamed into a
    /// temp file in that directory and atomically renamed over `destination`
    /// after a successful flush. On any error the temp file is removed and
    /// `destination` is left untouched.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Writing or renaming the file fails
    #[instrument(skip(self), fields(url = %url, path = %destination.display()))]
    pub async fn download_file(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        debug!("starting download");

        let parent = destination
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;

        let response = self.send_request(url).await?;

        let temp = temp_file_for(destination, parent)?;
        let handle = temp
            .reopen()
            .map_err(|e| DownloadError::io(temp.path(), e))?;
        let mut file = tokio::fs::File::from_std(handle);

        // Dropping `temp` on the error path unlinks the partial file.
        let bytes_written = match stream_to_file(&mut file, response, url, temp.path()).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %temp.path().display(), "discarding partial download");
                return Err(error);
            }
        };
        file.sync_all()
            .await
            .map_err(|e| DownloadError::io(temp.path(), e))?;
        drop(file);

        temp.persist(destination)
            .map_err(|e| DownloadError::io(destination, e.error))?;

        info!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }

    async fn send_request(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Creates `<destination name>.XXXXXX` in `dir`.
fn temp_file_for(destination: &Path, dir: &Path) -> Result<NamedTempFile, DownloadError> {
    let prefix = destination
        .file_name()
        .map(|name| format!("{}.", name.to_string_lossy()))
        .unwrap_or_else(|| ".download.".to_string());
    tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(dir)
        .map_err(|e| DownloadError::io(dir, e))
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut tokio::fs::File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent::default_user_agent())
        .build()
}
