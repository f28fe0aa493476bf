//! SHA-256 hex digest utilities.
//!
//! Exactly one hashing path exists in the system: the streaming hasher
//! below, fed in fixed-size chunks by the storage layer. The one-shot
//! helper is a thin wrapper over the same primitive for in-memory data.

use sha2::{Digest, Sha256};

/// Chunk size used when streaming a blob through the hasher.
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Incremental SHA-256 hasher for streaming large blobs.
///
/// The final digest depends only on the byte content, never on how the
/// input was chunked.
pub struct StreamingSha256 {
    inner: Sha256,
}

impl StreamingSha256 {
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Feed a chunk of bytes into the hasher.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Consume the hasher and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        let hash = self.inner.finalize();
        format!("{hash:x}")
    }
}

impl Default for StreamingSha256 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn consistent_output() {
        let data = b"hello world";
        assert_eq!(sha256_hex(data), sha256_hex(data));
        assert_eq!(sha256_hex(data).len(), 64);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut hasher = StreamingSha256::new();
        hasher.update(data);
        assert_eq!(hasher.finalize_hex(), sha256_hex(data));
    }

    #[test]
    fn streaming_is_chunk_size_independent() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let expected = sha256_hex(&data);

        for chunk_size in [1, 7, 64, HASH_CHUNK_SIZE, data.len()] {
            let mut hasher = StreamingSha256::new();
            for chunk in data.chunks(chunk_size) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize_hex(), expected, "chunk size {chunk_size}");
        }
    }
}
