//! Streaming file digests.

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::{debug, instrument};

use super::{ChecksumError, HashAlgorithm};

/// Read buffer size for hashing (1 MiB).
const CHUNK_SIZE: usize = 1024 * 1024;

/// Computes the lowercase hex digest of the file at `path`.
///
/// The file is streamed in fixed-size chunks, so memory use does not grow
/// with file size.
///
/// # Errors
///
/// Returns [`ChecksumError::Io`] if the file cannot be opened or read.
#[instrument(skip(algorithm), fields(path = %path.display(), algorithm = %algorithm))]
pub async fn calculate_digest(
    path: &Path,
    algorithm: HashAlgorithm,
) -> Result<String, ChecksumError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| ChecksumError::io(path, e))?;
    let mut hasher = algorithm.hasher();
    let mut buffer = vec![0_u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let read = file
            .read(&mut buffer)
            .await
            .map_err(|e| ChecksumError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        total += read as u64;
    }

    let digest = hex::encode(hasher.finalize());
    debug!(bytes = total, %digest, "digest computed");
    Ok(digest)
}
