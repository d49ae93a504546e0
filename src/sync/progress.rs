//! Progress reporting for synchronisation runs.
//!
//! The synchronizer reports what happens to each release through a
//! [`ProgressSink`]. The sink is chosen once when the synchronizer is built:
//! [`TracingSink`] emits log events, [`NullSink`] discards everything.

use tracing::{debug, info, warn};

use super::SyncError;
use super::synchronizer::SyncStats;
use crate::checksum::HashAlgorithm;
use crate::config::ReleaseContext;

/// Something observable that happened during a run.
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// No release matched the configuration and filters.
    NothingSelected,
    /// Work on a release began.
    ReleaseStarted {
        /// The release.
        release: &'a ReleaseContext,
    },
    /// The remote manifest equals the local marker; nothing was downloaded.
    ReleaseSkipped {
        /// The release.
        release: &'a ReleaseContext,
    },
    /// An artifact was downloaded and its digest matched.
    ArtifactVerified {
        /// The release.
        release: &'a ReleaseContext,
        /// Artifact filename.
        artifact: &'a str,
        /// Algorithm used for verification.
        algorithm: HashAlgorithm,
        /// Lowercase hex digest of the file.
        digest: &'a str,
    },
    /// An attempt failed and another one follows.
    AttemptFailed {
        /// The release.
        release: &'a ReleaseContext,
        /// Artifact filename.
        artifact: &'a str,
        /// 1-based attempt number that failed.
        attempt: u32,
        /// Attempt budget.
        max_attempts: u32,
        /// Why it failed.
        error: &'a SyncError,
    },
    /// Every artifact verified and the marker was committed.
    ReleaseUpdated {
        /// The release.
        release: &'a ReleaseContext,
    },
    /// All selected releases were processed.
    RunCompleted {
        /// Final counters.
        stats: &'a SyncStats,
    },
}

/// Receives [`SyncEvent`]s from the synchronizer.
pub trait ProgressSink: Send + Sync {
    /// Handles one event. Must not fail; sinks swallow their own problems.
    fn on_event(&self, event: &SyncEvent<'_>);
}

/// Sink that turns events into `tracing` log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn on_event(&self, event: &SyncEvent<'_>) {
        match event {
            SyncEvent::NothingSelected => {
                info!("No matching distros/releases found; nothing to do.");
            }
            SyncEvent::ReleaseStarted { release } => {
                debug!(
                    distro = release.distro(),
                    release = release.release(),
                    url = %release.checksum_url(),
                    "syncing release"
                );
            }
            SyncEvent::ReleaseSkipped { release } => {
                info!(
                    distro = release.distro(),
                    release = release.release(),
                    "[skip] {}: checksum unchanged",
                    release.label()
                );
            }
            SyncEvent::ArtifactVerified {
                release,
                artifact,
                algorithm,
                digest,
            } => {
                info!(
                    distro = release.distro(),
                    release = release.release(),
                    artifact,
                    digest = %digest,
                    "[ok] {}: {artifact} verified with {algorithm} digest",
                    release.label()
                );
            }
            SyncEvent::AttemptFailed {
                release,
                artifact,
                attempt,
                max_attempts,
                error,
            } => {
                warn!(
                    distro = release.distro(),
                    release = release.release(),
                    artifact,
                    attempt,
                    "[retry] {}: {artifact} attempt {attempt}/{max_attempts} failed ({error})",
                    release.label()
                );
            }
            SyncEvent::ReleaseUpdated { release } => {
                info!(
                    distro = release.distro(),
                    release = release.release(),
                    "[update] {}: checksum updated",
                    release.label()
                );
            }
            SyncEvent::RunCompleted { stats } => {
                info!(
                    skipped = stats.skipped(),
                    "Completed image synchronisation ({} release(s) updated)",
                    stats.updated()
                );
            }
        }
    }
}

/// Sink that discards every event (quiet mode).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_event(&self, _event: &SyncEvent<'_>) {}
}
