//! Error types for checksum handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while selecting a hash algorithm or digesting a file.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// No supported algorithm name appears in the manifest filename.
    #[error("Cannot determine hash algorithm from checksum file '{checksum_file}'")]
    UnsupportedAlgorithm {
        /// The manifest filename that was inspected.
        checksum_file: String,
    },

    /// The file being digested could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ChecksumError {
    /// Creates an unsupported-algorithm error.
    pub fn unsupported_algorithm(checksum_file: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm {
            checksum_file: checksum_file.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
