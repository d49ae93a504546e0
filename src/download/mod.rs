//! HTTP transport for checksum manifests and cloud image artifacts.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for multi-gigabyte images)
//! - Temp file in the destination directory, renamed into place on success
//! - Transport-default timeouts; long transfers are never cut off
//! - Structured error types with full context
//! - Attempt budget ([`RetryPolicy`]) for download+verify loops
//!
//! # Example
//!
//! ```no_run
//! use image_sync_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! client
//!     .download_file("https://example.test/bookworm/disk.img", Path::new("./images/disk.img"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod retry;
mod source;

pub use client::HttpClient;
pub use error::DownloadError;
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
pub use source::ArtifactSource;
