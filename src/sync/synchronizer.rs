//! Per-release synchronisation: manifest, change detection, verified
//! downloads, marker commit.
//!
//! Releases and artifacts are processed strictly one after another. The
//! first error aborts the run; releases already updated stay updated.

use std::path::Path;

use tracing::{debug, instrument, warn};

use super::SyncError;
use super::marker::{commit_marker, marker_matches};
use super::progress::{ProgressSink, SyncEvent};
use crate::checksum::{ChecksumManifest, HashAlgorithm, calculate_digest};
use crate::config::ReleaseContext;
use crate::download::{ArtifactSource, RetryPolicy};

/// What happened to a single release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// All artifacts were downloaded, verified, and the marker committed.
    Updated,
    /// The remote manifest matched the marker; nothing was downloaded.
    Skipped,
}

/// Counters from a [`ReleaseSynchronizer::sync_all`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    updated: usize,
    skipped: usize,
}

impl SyncStats {
    /// Releases whose artifacts and marker were refreshed.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.updated
    }

    /// Releases left alone because the manifest was unchanged.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Releases processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.updated + self.skipped
    }

    fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Mirrors releases from their remote source into the local images tree.
pub struct ReleaseSynchronizer {
    source: Box<dyn ArtifactSource>,
    retry_policy: RetryPolicy,
    progress: Box<dyn ProgressSink>,
}

impl std::fmt::Debug for ReleaseSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseSynchronizer")
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl ReleaseSynchronizer {
    /// Creates a synchronizer from its collaborators.
    #[must_use]
    pub fn new(
        source: Box<dyn ArtifactSource>,
        retry_policy: RetryPolicy,
        progress: Box<dyn ProgressSink>,
    ) -> Self {
        Self {
            source,
            retry_policy,
            progress,
        }
    }

    /// Synchronises every release in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyncError`]. Releases before the failing one keep
    /// their new state; later releases are not touched.
    pub async fn sync_all(&self, releases: Vec<ReleaseContext>) -> Result<SyncStats, SyncError> {
        let mut stats = SyncStats::default();
        if releases.is_empty() {
            self.progress.on_event(&SyncEvent::NothingSelected);
            return Ok(stats);
        }

        for release in &releases {
            let outcome = self.sync_release(release).await?;
            stats.record(outcome);
        }

        self.progress.on_event(&SyncEvent::RunCompleted { stats: &stats });
        Ok(stats)
    }

    /// Synchronises one release.
    ///
    /// Fetches the manifest, checks that every configured artifact is listed,
    /// compares it to the marker, then downloads and verifies each artifact.
    /// The marker is rewritten only after the last artifact verifies, so a
    /// failure anywhere leaves the previous marker in place.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Download`] if the manifest cannot be fetched
    /// - [`SyncError::Checksum`] if the algorithm cannot be detected
    /// - [`SyncError::MissingEntries`] if artifacts are absent from the manifest
    /// - [`SyncError::ArtifactFailed`] if an artifact exhausts its attempts
    /// - [`SyncError::Marker`] if the marker cannot be read or committed
    #[instrument(skip(self, release), fields(release = %release.label()))]
    pub async fn sync_release(&self, release: &ReleaseContext) -> Result<SyncOutcome, SyncError> {
        self.progress.on_event(&SyncEvent::ReleaseStarted { release });

        let text = self.source.fetch_text(&release.checksum_url()).await?;
        let manifest = ChecksumManifest::parse(text);
        let algorithm = HashAlgorithm::detect(release.checksum_file())?;

        let missing = manifest.missing(release.artifacts());
        if !missing.is_empty() {
            let missing = missing.into_iter().map(str::to_string).collect();
            return Err(SyncError::missing_entries(release, missing));
        }

        let marker = release.marker_path();
        if marker_matches(&marker, manifest.raw()).await? {
            self.progress.on_event(&SyncEvent::ReleaseSkipped { release });
            return Ok(SyncOutcome::Skipped);
        }

        for artifact in release.artifacts() {
            let expected = manifest.digest_for(artifact).ok_or_else(|| {
                SyncError::missing_entries(release, vec![artifact.clone()])
            })?;
            self.sync_artifact(release, artifact, expected, algorithm)
                .await?;
        }

        commit_marker(&marker, manifest.raw()).await?;
        self.progress.on_event(&SyncEvent::ReleaseUpdated { release });
        Ok(SyncOutcome::Updated)
    }

    /// Downloads and verifies one artifact within the attempt budget.
    async fn sync_artifact(
        &self,
        release: &ReleaseContext,
        artifact: &str,
        expected: &str,
        algorithm: HashAlgorithm,
    ) -> Result<(), SyncError> {
        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt = 1;

        loop {
            match self
                .attempt_artifact(release, artifact, expected, algorithm)
                .await
            {
                Ok(digest) => {
                    self.progress.on_event(&SyncEvent::ArtifactVerified {
                        release,
                        artifact,
                        algorithm,
                        digest: &digest,
                    });
                    return Ok(());
                }
                Err(error) => {
                    if self.retry_policy.is_final_attempt(attempt) {
                        return Err(SyncError::artifact_failed(
                            release, artifact, attempt, error,
                        ));
                    }
                    self.progress.on_event(&SyncEvent::AttemptFailed {
                        release,
                        artifact,
                        attempt,
                        max_attempts,
                        error: &error,
                    });
                    attempt += 1;
                }
            }
        }
    }

    /// One download + verify pass. Returns the verified digest.
    async fn attempt_artifact(
        &self,
        release: &ReleaseContext,
        artifact: &str,
        expected: &str,
        algorithm: HashAlgorithm,
    ) -> Result<String, SyncError> {
        let destination = release.artifact_path(artifact);
        let bytes = self
            .source
            .download_file(&release.artifact_url(artifact), &destination)
            .await?;
        debug!(artifact, bytes, "artifact downloaded");

        let verified = verify_file(&destination, artifact, expected, algorithm).await;
        if verified.is_err() {
            discard_file(&destination).await;
        }
        verified
    }
}

async fn verify_file(
    path: &Path,
    artifact: &str,
    expected: &str,
    algorithm: HashAlgorithm,
) -> Result<String, SyncError> {
    let actual = calculate_digest(path, algorithm).await?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(actual)
    } else {
        Err(SyncError::checksum_mismatch(artifact, expected, actual))
    }
}

/// Removes a downloaded file that failed verification.
async fn discard_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed unverified file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove unverified file"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::download::DownloadError;
    use crate::sync::NullSink;

    const BASE: &str = "https://mirror.test";

    /// URLs requested from a [`FakeSource`], shared with the test.
    #[derive(Clone, Default)]
    struct CallLog {
        fetches: Arc<Mutex<Vec<String>>>,
        downloads: Arc<Mutex<Vec<String>>>,
    }

    impl CallLog {
        fn fetches(&self) -> Vec<String> {
            self.fetches.lock().unwrap().clone()
        }

        fn downloads(&self) -> Vec<String> {
            self.downloads.lock().unwrap().clone()
        }
    }

    /// In-memory source; records every manifest and download URL.
    #[derive(Default)]
    struct FakeSource {
        texts: HashMap<String, String>,
        files: HashMap<String, Vec<u8>>,
        log: CallLog,
    }

    impl FakeSource {
        fn text(mut self, url: &str, body: &str) -> Self {
            self.texts.insert(url.to_string(), body.to_string());
            self
        }

        fn file(mut self, url: &str, body: &[u8]) -> Self {
            self.files.insert(url.to_string(), body.to_vec());
            self
        }
    }

    #[async_trait]
    impl ArtifactSource for FakeSource {
        async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
            self.log.fetches.lock().unwrap().push(url.to_string());
            self.texts
                .get(url)
                .cloned()
                .ok_or_else(|| DownloadError::http_status(url, 404))
        }

        async fn download_file(
            &self,
            url: &str,
            destination: &Path,
        ) -> Result<u64, DownloadError> {
            self.log.downloads.lock().unwrap().push(url.to_string());
            let body = self
                .files
                .get(url)
                .ok_or_else(|| DownloadError::http_status(url, 404))?;
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(|e| DownloadError::io(parent, e))?;
            }
            std::fs::write(destination, body).map_err(|e| DownloadError::io(destination, e))?;
            Ok(body.len() as u64)
        }
    }

    struct Harness {
        _dir: TempDir,
        release: ReleaseContext,
    }

    fn harness(artifacts: &[&str]) -> Harness {
        let dir = TempDir::new().unwrap();
        let release = ReleaseContext::new(
            "debian",
            "bookworm",
            BASE,
            "latest",
            "SHA256SUMS",
            artifacts.iter().map(|a| (*a).to_string()).collect(),
            dir.path(),
        );
        Harness { _dir: dir, release }
    }

    fn sha256(data: &[u8]) -> String {
        HashAlgorithm::Sha256.digest_hex(data)
    }

    fn synchronizer(source: FakeSource, attempts: u32) -> (ReleaseSynchronizer, CallLog) {
        let log = source.log.clone();
        let sync = ReleaseSynchronizer::new(
            Box::new(source),
            RetryPolicy::with_max_attempts(attempts),
            Box::new(NullSink),
        );
        (sync, log)
    }

    #[tokio::test]
    async fn test_sync_release_updates_then_skips() {
        let h = harness(&["disk.img"]);
        let manifest = format!("{}  disk.img\n", sha256(b"image"));
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/disk.img"), b"image");
        let (sync, source) = synchronizer(source, 3);

        let first = sync.sync_release(&h.release).await.unwrap();
        assert_eq!(first, SyncOutcome::Updated);
        assert_eq!(std::fs::read(h.release.artifact_path("disk.img")).unwrap(), b"image");
        assert_eq!(std::fs::read_to_string(h.release.marker_path()).unwrap(), manifest);

        let second = sync.sync_release(&h.release).await.unwrap();
        assert_eq!(second, SyncOutcome::Skipped);
        assert_eq!(source.downloads().len(), 1, "skip must not download");
    }

    #[tokio::test]
    async fn test_sync_release_digest_compare_ignores_case() {
        let h = harness(&["disk.img"]);
        let manifest = format!("{} *disk.img\n", sha256(b"image").to_uppercase());
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/disk.img"), b"image");
        let (sync, _) = synchronizer(source, 1);

        assert_eq!(sync.sync_release(&h.release).await.unwrap(), SyncOutcome::Updated);
    }

    #[tokio::test]
    async fn test_sync_release_mismatch_uses_full_budget_and_keeps_marker() {
        let h = harness(&["disk.img"]);
        std::fs::create_dir_all(h.release.release_dir()).unwrap();
        std::fs::write(h.release.marker_path(), "previous\n").unwrap();
        let manifest = format!("{}  disk.img\n", "0".repeat(64));
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/disk.img"), b"corrupt");
        let (sync, source) = synchronizer(source, 2);

        let err = sync.sync_release(&h.release).await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::ArtifactFailed { attempts: 2, ref artifact, .. } if artifact == "disk.img"
        ));
        let msg = err.to_string();
        assert!(msg.contains("disk.img") && msg.contains("2 attempts"), "{msg}");
        assert_eq!(source.downloads().len(), 2);
        assert_eq!(
            std::fs::read_to_string(h.release.marker_path()).unwrap(),
            "previous\n"
        );
        assert!(!h.release.artifact_path("disk.img").exists(), "mismatched file removed");
    }

    #[tokio::test]
    async fn test_sync_release_missing_entries_downloads_nothing() {
        let h = harness(&["disk.img", "other.img", "third.img"]);
        let manifest = format!("{}  disk.img\n", sha256(b"image"));
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/disk.img"), b"image");
        let (sync, source) = synchronizer(source, 3);

        let err = sync.sync_release(&h.release).await.unwrap_err();

        match &err {
            SyncError::MissingEntries { missing, .. } => {
                assert_eq!(missing, &["other.img", "third.img"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(source.downloads().is_empty());
        assert!(!h.release.marker_path().exists());
    }

    #[tokio::test]
    async fn test_sync_release_later_artifact_failure_keeps_marker() {
        let h = harness(&["a.img", "b.img"]);
        let manifest = format!("{}  a.img\n{}  b.img\n", sha256(b"a"), sha256(b"b"));
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/a.img"), b"a");
        let (sync, source) = synchronizer(source, 2);

        let err = sync.sync_release(&h.release).await.unwrap_err();

        assert!(matches!(err, SyncError::ArtifactFailed { ref artifact, .. } if artifact == "b.img"));
        assert!(h.release.artifact_path("a.img").exists());
        assert!(!h.release.marker_path().exists());
        assert_eq!(
            source.downloads(),
            [
                format!("{BASE}/bookworm/latest/a.img"),
                format!("{BASE}/bookworm/latest/b.img"),
                format!("{BASE}/bookworm/latest/b.img"),
            ]
        );
    }

    #[tokio::test]
    async fn test_sync_release_manifest_failure_is_not_retried() {
        let h = harness(&["disk.img"]);
        let (sync, source) = synchronizer(FakeSource::default(), 5);

        let err = sync.sync_release(&h.release).await.unwrap_err();

        assert!(matches!(err, SyncError::Download(DownloadError::HttpStatus { status: 404, .. })));
        assert_eq!(source.fetches(), [format!("{BASE}/bookworm/latest/SHA256SUMS")]);
        assert!(source.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_sync_release_unknown_algorithm_fails_before_downloading() {
        let dir = TempDir::new().unwrap();
        let release = ReleaseContext::new(
            "debian",
            "bookworm",
            BASE,
            "",
            "CHECKSUMS",
            vec!["disk.img".to_string()],
            dir.path(),
        );
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/CHECKSUMS"), "aa  disk.img\n");
        let (sync, source) = synchronizer(source, 3);

        let err = sync.sync_release(&release).await.unwrap_err();

        assert!(matches!(err, SyncError::Checksum(_)));
        assert!(source.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_sync_all_counts_and_reports_nothing_selected() {
        let (sync, _) = synchronizer(FakeSource::default(), 1);
        let stats = sync.sync_all(Vec::new()).await.unwrap();
        assert_eq!(stats, SyncStats::default());
        assert_eq!(stats.total(), 0);
    }

    #[tokio::test]
    async fn test_sync_all_stops_at_first_failure() {
        let h = harness(&["disk.img"]);
        let second = ReleaseContext::new(
            "debian",
            "trixie",
            BASE,
            "latest",
            "SHA256SUMS",
            vec!["disk.img".to_string()],
            h.release.images_root(),
        );
        let trixie_manifest = format!("{}  disk.img\n", sha256(b"trixie"));
        let source = FakeSource::default()
            .text(&format!("{BASE}/trixie/latest/SHA256SUMS"), &trixie_manifest)
            .file(&format!("{BASE}/trixie/latest/disk.img"), b"trixie");
        let (sync, source) = synchronizer(source, 3);

        let err = sync
            .sync_all(vec![h.release.clone(), second.clone()])
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Download(DownloadError::HttpStatus { status: 404, .. })));
        assert_eq!(source.fetches(), [format!("{BASE}/bookworm/latest/SHA256SUMS")]);
        assert!(source.downloads().is_empty());
        assert!(!second.release_dir().exists());
    }

    #[tokio::test]
    async fn test_sync_all_records_each_outcome() {
        let h = harness(&["disk.img"]);
        let manifest = format!("{}  disk.img\n", sha256(b"image"));
        let source = FakeSource::default()
            .text(&format!("{BASE}/bookworm/latest/SHA256SUMS"), &manifest)
            .file(&format!("{BASE}/bookworm/latest/disk.img"), b"image");
        let (sync, _) = synchronizer(source, 3);

        let stats = sync
            .sync_all(vec![h.release.clone(), h.release.clone()])
            .await
            .unwrap();

        assert_eq!((stats.updated(), stats.skipped(), stats.total()), (1, 1, 2));
    }
}
