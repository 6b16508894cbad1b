//! Multipart form parsing for post create/edit requests.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;

use scribe_core::domain::{MAX_THUMBNAIL_BYTES, PostDraft, PostEdit, ThumbnailUpload};

use crate::middleware::error::{AppError, AppResult};

/// Cap on a single text field.
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// Fields of a post form as sent by the client. Missing fields stay empty.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: Option<ThumbnailUpload>,
}

impl From<PostForm> for PostDraft {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            category: form.category,
            description: form.description,
            thumbnail: form.thumbnail,
        }
    }
}

impl From<PostForm> for PostEdit {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            category: form.category,
            description: form.description,
            thumbnail: form.thumbnail,
        }
    }
}

impl PostForm {
    /// Read every part of the request. Unknown fields are skipped.
    pub async fn read(mut payload: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = payload.next().await {
            let mut field =
                field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "title" => form.title = read_text(&mut field).await?,
                "category" => form.category = read_text(&mut field).await?,
                "description" => form.description = read_text(&mut field).await?,
                "thumbnail" => form.thumbnail = read_thumbnail(&mut field).await?,
                _ => {
                    tracing::debug!(field = %name, "Skipping unknown form field");
                    while let Some(chunk) = field.next().await {
                        chunk.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
                    }
                }
            }
        }

        Ok(form)
    }
}

async fn read_text(field: &mut Field) -> AppResult<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::Validation("Field too long".to_string()));
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf).map_err(|_| AppError::BadRequest("Form field is not UTF-8".to_string()))
}

/// Read the file part. Only one byte past the size limit is kept, which is
/// enough for validation to reject it; the rest is drained.
///
/// A file input left empty arrives with neither a file name nor content and
/// counts as no thumbnail.
async fn read_thumbnail(field: &mut Field) -> AppResult<Option<ThumbnailUpload>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();

    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
        if data.len() <= MAX_THUMBNAIL_BYTES {
            let room = MAX_THUMBNAIL_BYTES + 1 - data.len();
            data.extend_from_slice(&chunk[..chunk.len().min(room)]);
        }
    }

    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }
    Ok(Some(ThumbnailUpload::new(file_name, data)))
}
