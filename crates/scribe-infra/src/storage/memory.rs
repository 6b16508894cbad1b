//! In-memory blob store - used in tests and when no upload directory is wanted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::ports::{BlobError, BlobStore};

use super::check_name;

/// Blobs kept in a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), BlobError> {
        check_name(name)?;
        self.blobs
            .write()
            .await
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), BlobError> {
        self.blobs
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BlobError::NotFound(name.to_string()))
    }

    async fn exists(&self, name: &str) -> bool {
        self.blobs.read().await.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = InMemoryBlobStore::new();
        store.put("a.png", b"one").await.unwrap();
        store.put("a.png", b"two").await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryBlobStore::new();
        store.put("a.png", b"one").await.unwrap();
        store.remove("a.png").await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.remove("a.png").await,
            Err(BlobError::NotFound(_))
        ));
    }
}
