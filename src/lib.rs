//! Cloud Image Sync Core Library
//!
//! This library mirrors cloud images (qcow2, raw, ...) published by Linux
//! distributions into a local directory tree, verifying every download
//! against the distribution's checksum manifest.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Configuration file parser and release selection
//! - [`checksum`] - Manifest parsing, hash algorithm detection, file digests
//! - [`download`] - HTTP transport with streaming downloads and attempt budget
//! - [`sync`] - Per-release synchronisation and the `remote-checksum` marker

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod checksum;
pub mod config;
pub mod download;
pub mod sync;
mod user_agent;

// Re-export commonly used types
pub use checksum::{ChecksumError, ChecksumManifest, HashAlgorithm, calculate_digest};
pub use config::{ConfigError, ReleaseContext, ReleaseFilter, load_release_contexts};
pub use download::{ArtifactSource, DownloadError, HttpClient, RetryPolicy};
pub use sync::{
    NullSink, ProgressSink, ReleaseSynchronizer, SyncError, SyncEvent, SyncOutcome, SyncStats,
    TracingSink,
};
