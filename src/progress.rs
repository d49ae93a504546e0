//! Progress UI (spinner) for interactive runs.

use std::time::Duration;

use image_sync_core::sync::{ProgressSink, SyncEvent, TracingSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Sink that shows the current release/artifact on a spinner and forwards
/// every event to [`TracingSink`] without tearing the spinner line.
pub(crate) struct SpinnerSink {
    spinner: ProgressBar,
    inner: TracingSink,
}

impl SpinnerSink {
    pub(crate) fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self {
            spinner,
            inner: TracingSink,
        }
    }

    fn status(event: &SyncEvent<'_>) -> Option<String> {
        match event {
            SyncEvent::ReleaseStarted { release } => {
                Some(format!("Checking {}...", release.label()))
            }
            SyncEvent::ArtifactVerified {
                release, artifact, ..
            } => Some(format!("{}: {artifact} verified", release.label())),
            SyncEvent::AttemptFailed {
                release,
                artifact,
                attempt,
                max_attempts,
                ..
            } => Some(format!(
                "Retrying {}/{artifact} ({}/{max_attempts})...",
                release.label(),
                attempt + 1
            )),
            _ => None,
        }
    }
}

impl ProgressSink for SpinnerSink {
    fn on_event(&self, event: &SyncEvent<'_>) {
        self.spinner.suspend(|| self.inner.on_event(event));
        if let Some(message) = Self::status(event) {
            self.spinner.set_message(message);
        }
        if matches!(
            event,
            SyncEvent::NothingSelected | SyncEvent::RunCompleted { .. }
        ) {
            self.spinner.finish_and_clear();
        }
    }
}

impl Drop for SpinnerSink {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}
