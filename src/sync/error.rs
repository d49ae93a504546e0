//! Error types for release synchronisation.

use std::path::PathBuf;

use thiserror::Error;

use crate::checksum::ChecksumError;
use crate::config::ReleaseContext;
use crate::download::DownloadError;

/// Errors that abort the synchronisation of a release.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Fetching the manifest or an artifact failed at the transport level.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Algorithm detection or digesting a local file failed.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// Configured artifacts have no entry in the remote manifest.
    #[error("{release}: checksum file missing entries for {}", .missing.join(", "))]
    MissingEntries {
        /// `distro/release` label.
        release: String,
        /// Every configured artifact absent from the manifest, in order.
        missing: Vec<String>,
    },

    /// A downloaded artifact's digest differs from the manifest.
    #[error("Checksum mismatch for {artifact} (expected {expected}, got {actual})")]
    ChecksumMismatch {
        /// Artifact filename.
        artifact: String,
        /// Digest listed in the manifest.
        expected: String,
        /// Digest of the downloaded file.
        actual: String,
    },

    /// An artifact exhausted its attempt budget.
    #[error("{release}: failed to download {artifact} after {attempts} attempts ({source})")]
    ArtifactFailed {
        /// `distro/release` label.
        release: String,
        /// Artifact filename.
        artifact: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the last attempt.
        #[source]
        source: Box<SyncError>,
    },

    /// Reading or committing the sync marker failed.
    #[error("IO error updating sync marker {path}: {source}")]
    Marker {
        /// Marker (or its temp file) path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Creates a missing-entries error for a release.
    pub fn missing_entries(ctx: &ReleaseContext, missing: Vec<String>) -> Self {
        Self::MissingEntries {
            release: ctx.label(),
            missing,
        }
    }

    /// Creates a checksum mismatch error.
    pub fn checksum_mismatch(
        artifact: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ChecksumMismatch {
            artifact: artifact.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Wraps the last attempt's error once the attempt budget is spent.
    pub fn artifact_failed(
        ctx: &ReleaseContext,
        artifact: impl Into<String>,
        attempts: u32,
        last_error: SyncError,
    ) -> Self {
        Self::ArtifactFailed {
            release: ctx.label(),
            artifact: artifact.into(),
            attempts,
            source: Box::new(last_error),
        }
    }

    /// Creates a marker IO error.
    pub fn marker(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Marker {
            path: path.into(),
            source,
        }
    }
}
