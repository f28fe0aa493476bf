//! Content store abstraction and streaming digest computation.
//!
//! Blobs are durable byte storage keyed by an opaque string. The
//! versioning system treats the store as append-only: existing blobs
//! are never overwritten, and `remove` is only ever invoked from
//! permanent delete.

pub mod digest;
pub mod local;

use std::io;

use async_trait::async_trait;
use tokio::io::AsyncRead;

pub use local::LocalContentStore;

/// Readable blob stream; blanket-implemented for any suitable reader.
pub trait BlobRead: AsyncRead + Send + Unpin + std::fmt::Debug {}

impl<T: AsyncRead + Send + Unpin + std::fmt::Debug> BlobRead for T {}

/// Boxed reader over a stored blob.
pub type BlobReader = Box<dyn BlobRead>;

/// Durable blob storage keyed by an opaque identifier.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `bytes` under a fresh opaque key and return the key.
    ///
    /// The write is flushed to disk before this returns -- the digest
    /// pass reads the same bytes immediately afterwards.
    ///
    /// `original_name` is used only to preserve a file extension on
    /// the generated key; the key itself is always a fresh UUID.
    async fn put(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String>;

    /// Open a stored blob for streaming reads.
    async fn open(&self, key: &str) -> io::Result<BlobReader>;

    /// Physically delete a blob. Removing a missing blob is a no-op,
    /// not an error, so cleanup stays idempotent.
    async fn remove(&self, key: &str) -> io::Result<()>;
}

/// Generate an opaque blob key: a UUID v4, keeping the extension of
/// the original filename when one is present.
pub fn generate_blob_key(original_name: Option<&str>) -> String {
    let id = uuid::Uuid::new_v4();
    match original_name.and_then(extension_of) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Extract a usable extension from a filename, if any.
fn extension_of(name: &str) -> Option<&str> {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext)?;
    if ext.is_empty() || ext.contains(['/', '\\']) {
        None
    } else {
        Some(ext)
    }
}
