//! Hash algorithm selection.

use std::fmt;

use md5::Md5;
use sha1::Sha1;
use sha2::digest::DynDigest;
use sha2::{Sha256, Sha384, Sha512};

use super::ChecksumError;

/// Digest algorithms a checksum manifest can be written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha512,
    Sha384,
    Sha256,
    Sha1,
    Md5,
}

impl HashAlgorithm {
    /// Detection order: longer and more specific names first, so that
    /// `SHA512SUMS` is never mistaken for `sha1`.
    pub const DETECTION_ORDER: [HashAlgorithm; 5] = [
        Self::Sha512,
        Self::Sha384,
        Self::Sha256,
        Self::Sha1,
        Self::Md5,
    ];

    /// Picks the algorithm whose name appears in `checksum_file`
    /// (case-insensitive substring match).
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::UnsupportedAlgorithm`] when no known name is
    /// present.
    pub fn detect(checksum_file: &str) -> Result<Self, ChecksumError> {
        let lowered = checksum_file.to_ascii_lowercase();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|algorithm| lowered.contains(algorithm.name()))
            .ok_or_else(|| ChecksumError::unsupported_algorithm(checksum_file))
    }

    /// Lowercase algorithm name as it appears in manifest filenames.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha512 => "sha512",
            Self::Sha384 => "sha384",
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
        }
    }

    /// Fresh hasher for this algorithm.
    #[must_use]
    pub fn hasher(self) -> Box<dyn DynDigest + Send> {
        match self {
            Self::Sha512 => Box::new(Sha512::default()),
            Self::Sha384 => Box::new(Sha384::default()),
            Self::Sha256 => Box::new(Sha256::default()),
            Self::Sha1 => Box::new(Sha1::default()),
            Self::Md5 => Box::new(Md5::default()),
        }
    }

    /// Lowercase hex digest of an in-memory buffer.
    #[must_use]
    pub fn digest_hex(self, data: &[u8]) -> String {
        let mut hasher = self.hasher();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}
