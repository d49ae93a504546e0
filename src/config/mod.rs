//! Configuration parsing and validation.
//!
//! The configuration file uses a small indentation-structured format: nested
//! `key: value` mappings, `- item` sequences, scalars, and `#` comments. There
//! is no flow syntax, no anchors, and no multi-document support.
//!
//! ```text
//! distros:
//!   debian:
//!     baseURL: https://cloud.debian.org/images/cloud
//!     releases:
//!       bookworm:
//!         releaseURL: latest
//!         remoteChecksums: SHA512SUMS
//!         artifacts:
//!           - debian-12-genericcloud-amd64.qcow2
//! ```
//!
//! Text is tokenized into lines ([`tokenize`]), parsed into a generic
//! [`ConfigValue`] tree ([`parse_document`]), and validated into typed
//! [`ReleaseContext`] records ([`release_contexts`]).
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use image_sync_core::config::{parse_document, release_contexts, ReleaseFilter};
//!
//! let text = "distros:\n  debian:\n    baseURL: https://example.test\n    releases:\n      bookworm:\n        remoteChecksums: SHA256SUMS\n        artifacts:\n          - disk.img\n";
//! let config = parse_document(text).unwrap();
//! let contexts = release_contexts(&config, Path::new("images"), &ReleaseFilter::default()).unwrap();
//! assert_eq!(contexts[0].checksum_url(), "https://example.test/bookworm/SHA256SUMS");
//! ```

mod error;
mod loader;
mod parser;
mod release;
mod scalar;
mod tokenizer;
mod value;

pub use error::ConfigError;
pub use loader::{ReleaseFilter, distros, load_config, load_release_contexts, release_contexts};
pub use parser::parse_document;
pub use release::{ReleaseContext, SYNC_MARKER_FILE, join_url_segments};
pub use scalar::parse_scalar;
pub use tokenizer::{LineToken, strip_comments, tokenize};
pub use value::{ConfigValue, Mapping};
