//! Thumbnail uploads and stored-name derivation.

use uuid::Uuid;

/// Largest accepted thumbnail, in bytes.
pub const MAX_THUMBNAIL_BYTES: usize = 2_000_000;

/// An uploaded thumbnail as received from the client.
#[derive(Debug, Clone)]
pub struct ThumbnailUpload {
    /// File name reported by the client (may be empty).
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ThumbnailUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_oversized(&self) -> bool {
        self.size() > MAX_THUMBNAIL_BYTES
    }
}

/// Build the blob name for an upload: `<basename><token>.<extension>`.
///
/// The basename is everything before the first `.`, the extension everything
/// after the last one, so `archive.tar.gz` keeps only `gz`. Directory
/// components sent by the client are dropped.
///
/// A name without a dot gets no extension: `README` becomes `README<token>`
/// rather than repeating the whole name as `README<token>.README`.
pub fn stored_filename(original: &str, token: Uuid) -> String {
    let name = original.rsplit(['/', '\\']).next().unwrap_or(original);

    match (name.split_once('.'), name.rsplit_once('.')) {
        (Some((base, _)), Some((_, extension))) => format!("{base}{token}.{extension}"),
        _ => format!("{name}{token}"),
    }
}
