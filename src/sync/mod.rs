//! Release synchronisation.
//!
//! For each selected release the [`ReleaseSynchronizer`]:
//!
//! 1. fetches the remote checksum manifest,
//! 2. detects the hash algorithm from the manifest filename,
//! 3. checks that every configured artifact is listed,
//! 4. skips the release if the manifest equals the local `remote-checksum`
//!    marker byte for byte,
//! 5. downloads and verifies each artifact within the attempt budget,
//! 6. commits the manifest text as the new marker (temp file + rename).
//!
//! # Example
//!
//! ```no_run
//! use image_sync_core::config::{ReleaseFilter, load_release_contexts};
//! use image_sync_core::download::{HttpClient, RetryPolicy};
//! use image_sync_core::sync::{ReleaseSynchronizer, TracingSink};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let releases = load_release_contexts(
//!     Path::new("conf/cloud-init.conf"),
//!     Path::new("images"),
//!     &ReleaseFilter::default(),
//! )?;
//! let synchronizer = ReleaseSynchronizer::new(
//!     Box::new(HttpClient::new()),
//!     RetryPolicy::with_max_attempts(3),
//!     Box::new(TracingSink),
//! );
//! let stats = synchronizer.sync_all(releases).await?;
//! println!("{} release(s) updated", stats.updated());
//! # Ok(())
//! # }
//! ```

mod error;
mod marker;
mod progress;
mod synchronizer;

pub use error::SyncError;
pub use marker::{commit_marker, marker_matches};
pub use progress::{NullSink, ProgressSink, SyncEvent, TracingSink};
pub use synchronizer::{ReleaseSynchronizer, SyncOutcome, SyncStats};
