//! Streaming blob digest (the hash verifier's read path).

use std::io;

use docguard_core::hashing::{StreamingSha256, HASH_CHUNK_SIZE};
use tokio::io::AsyncReadExt;

use crate::ContentStore;

/// Compute the SHA-256 hex digest of a stored blob.
///
/// The blob is streamed in [`HASH_CHUNK_SIZE`] chunks so arbitrarily
/// large files are never held in memory at once.
pub async fn digest_blob(store: &dyn ContentStore, key: &str) -> io::Result<String> {
    let mut reader = store.open(key).await?;
    let mut hasher = StreamingSha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finalize_hex())
}
