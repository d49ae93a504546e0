//! The per-release sync marker (`remote-checksum`).
//!
//! The marker holds the raw text of the last manifest whose artifacts were
//! all verified. Its absence means the release was never synced.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::SyncError;

/// Returns true if a marker exists at `path` and is byte-identical to
/// `manifest_text`.
///
/// # Errors
///
/// Returns [`SyncError::Marker`] if the marker exists but cannot be read.
pub async fn marker_matches(path: &Path, manifest_text: &str) -> Result<bool, SyncError> {
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(contents == manifest_text.as_bytes()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no sync marker");
            Ok(false)
        }
        Err(error) => Err(SyncError::marker(path, error)),
    }
}

/// Atomically replaces the marker at `path` with `manifest_text`.
///
/// The text is written to a temp file beside the marker, flushed to disk, and
/// renamed over it on the blocking pool. On failure the temp file is removed
/// and any previous marker is left as it was.
///
/// # Errors
///
/// Returns [`SyncError::Marker`] if the directory, temp file, write, or rename
/// fails.
pub async fn commit_marker(path: &Path, manifest_text: &str) -> Result<(), SyncError> {
    let owned_path = path.to_path_buf();
    let text = manifest_text.to_owned();
    tokio::task::spawn_blocking(move || write_marker(&owned_path, &text))
        .await
        .map_err(|e| SyncError::marker(path, std::io::Error::other(e)))?
}

fn write_marker(path: &Path, manifest_text: &str) -> Result<(), SyncError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| SyncError::marker(dir, e))?;

    let prefix = path
        .file_name()
        .map(|name| format!("{}.", name.to_string_lossy()))
        .unwrap_or_default();
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| SyncError::marker(dir, e))?;

    temp.write_all(manifest_text.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| SyncError::marker(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| SyncError::marker(path, e.error))?;

    debug!(path = %path.display(), bytes = manifest_text.len(), "sync marker committed");
    Ok(())
}
