//! Checksum manifests, hash algorithm detection, and file digests.
//!
//! # Example
//!
//! ```
//! use image_sync_core::checksum::{ChecksumManifest, HashAlgorithm};
//!
//! let manifest = ChecksumManifest::parse("ABC123 *disk.img\n");
//! assert_eq!(manifest.digest_for("disk.img"), Some("abc123"));
//! assert_eq!(HashAlgorithm::detect("SHA256SUMS").unwrap(), HashAlgorithm::Sha256);
//! ```

mod algorithm;
mod digest;
mod error;
mod manifest;

pub use algorithm::HashAlgorithm;
pub use digest::calculate_digest;
pub use error::ChecksumError;
pub use manifest::ChecksumManifest;
