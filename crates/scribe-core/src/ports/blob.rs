//! Blob storage port - where thumbnail files live.

use async_trait::async_trait;

/// Flat namespace of named binary objects.
///
/// Names are single path segments; implementations reject anything that
/// would escape the storage root.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `data` under `name`, replacing any existing blob.
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), BlobError>;

    /// Remove the blob called `name`.
    async fn remove(&self, name: &str) -> Result<(), BlobError>;

    /// Check if a blob exists.
    async fn exists(&self, name: &str) -> bool;
}

/// Blob storage errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Invalid blob name: {0:?}")]
    InvalidName(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
