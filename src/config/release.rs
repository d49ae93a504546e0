//! Typed per-release configuration records.

use std::path::{Path, PathBuf};

/// Name of the per-release file holding the last committed manifest text.
pub const SYNC_MARKER_FILE: &str = "remote-checksum";

/// Everything needed to synchronise one release of one distro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    distro: String,
    release: String,
    base_url: String,
    release_url: String,
    checksum_file: String,
    artifacts: Vec<String>,
    images_root: PathBuf,
}

impl ReleaseContext {
    /// Creates a release context.
    ///
    /// Callers are expected to have validated that `artifacts` is non-empty;
    /// the configuration loader does.
    #[must_use]
    pub fn new(
        distro: impl Into<String>,
        release: impl Into<String>,
        base_url: impl Into<String>,
        release_url: impl Into<String>,
        checksum_file: impl Into<String>,
        artifacts: Vec<String>,
        images_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            distro: distro.into(),
            release: release.into(),
            base_url: base_url.into(),
            release_url: release_url.into(),
            checksum_file: checksum_file.into(),
            artifacts,
            images_root: images_root.into(),
        }
    }

    #[must_use]
    pub fn distro(&self) -> &str {
        &self.distro
    }

    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    #[must_use]
    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    /// Remote checksum manifest filename, e.g. `SHA256SUMS`.
    #[must_use]
    pub fn checksum_file(&self) -> &str {
        &self.checksum_file
    }

    /// Artifact filenames in configured order.
    #[must_use]
    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }

    #[must_use]
    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    /// `<images root>/<distro>/<release>`.
    #[must_use]
    pub fn release_dir(&self) -> PathBuf {
        self.images_root.join(&self.distro).join(&self.release)
    }

    /// Path of the sync marker inside the release directory.
    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.release_dir().join(SYNC_MARKER_FILE)
    }

    /// Local destination of an artifact.
    #[must_use]
    pub fn artifact_path(&self, artifact: &str) -> PathBuf {
        self.release_dir().join(artifact)
    }

    /// URL of the remote checksum manifest.
    #[must_use]
    pub fn checksum_url(&self) -> String {
        self.remote_url(&self.checksum_file)
    }

    /// URL of a remote artifact.
    #[must_use]
    pub fn artifact_url(&self, artifact: &str) -> String {
        self.remote_url(artifact)
    }

    /// Short `distro/release` label used in log lines and errors.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.distro, self.release)
    }

    fn remote_url(&self, filename: &str) -> String {
        join_url_segments(&[
            &self.base_url,
            &self.release,
            &self.release_url,
            filename,
        ])
    }
}

/// Joins URL segments with `/`, trimming each segment's leading and trailing
/// slashes and skipping segments that end up empty.
#[must_use]
pub fn join_url_segments(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
