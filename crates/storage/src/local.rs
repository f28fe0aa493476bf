//! Local filesystem content store.
//!
//! Blobs live flat under a single root directory; there are no
//! directory semantics beyond unique key naming.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{generate_blob_key, BlobReader, ContentStore};

/// Flat-directory blob store.
pub struct LocalContentStore {
    root: PathBuf,
}

impl LocalContentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open_root(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn put(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        let key = generate_blob_key(original_name);
        let path = self.blob_path(&key);

        let mut file = fs::File::create(&path).await?;
        file.write_all(bytes).await?;
        // Durability contract: flushed before the key is handed out.
        file.sync_all().await?;

        tracing::debug!(key = %key, size = bytes.len(), "Stored blob");
        Ok(key)
    }

    async fn open(&self, key: &str) -> io::Result<BlobReader> {
        let file = fs::File::open(self.blob_path(key)).await?;
        Ok(Box::new(file))
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.blob_path(key)).await {
            Ok(()) => Ok(()),
            // Idempotent cleanup: the blob may already be gone.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    async fn temp_store() -> (tempfile::TempDir, LocalContentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::open_root(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn put_then_open_round_trip() {
        let (_dir, store) = temp_store().await;
        let key = store.put(Some("notes.txt"), b"hello").await.unwrap();

        let mut reader = store.open(&key).await.unwrap();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, b"hello");
    }

    #[tokio::test]
    async fn put_never_overwrites() {
        let (_dir, store) = temp_store().await;
        let a = store.put(None, b"first").await.unwrap();
        let b = store.put(None, b"second").await.unwrap();
        assert_ne!(a, b);

        let mut buf = Vec::new();
        store
            .open(&a)
            .await
            .unwrap()
            .read_to_end(&mut buf)
            .await
            .unwrap();
        assert_eq!(buf, b"first");
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let (_dir, store) = temp_store().await;
        let key = store.put(None, b"bytes").await.unwrap();

        store.remove(&key).await.unwrap();
        // Second removal of the same key must also succeed.
        store.remove(&key).await.unwrap();
        assert!(store.open(&key).await.is_err());
    }

    #[tokio::test]
    async fn open_missing_blob_fails() {
        let (_dir, store) = temp_store().await;
        assert!(store.open("no-such-key").await.is_err());
    }
}
