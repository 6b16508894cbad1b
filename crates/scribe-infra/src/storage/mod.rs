//! Blob storage for thumbnails - local directory or in-memory.

mod local;
mod memory;

pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;

use scribe_core::ports::BlobError;

/// Accept only names that are a single, ordinary path segment.
fn check_name(name: &str) -> Result<(), BlobError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if bad {
        return Err(BlobError::InvalidName(name.to_string()));
    }
    Ok(())
}
