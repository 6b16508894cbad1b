use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::thumbnail::ThumbnailUpload;
use crate::error::DomainError;

/// Shortest description accepted on edit.
///
/// The rich-text editor used by clients wraps even an empty document in
/// `<p><br></p>`, which is 11 characters.
pub const MIN_DESCRIPTION_LEN: usize = 12;

/// Post entity - a blog article owned by its creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Stored blob name of the thumbnail, if the post has one.
    pub thumbnail: Option<String>,
    pub creator: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(creator: Uuid, fields: PostChanges) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            category: fields.category,
            description: fields.description,
            thumbnail: fields.thumbnail,
            creator,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and bump `updated_at`.
    ///
    /// The thumbnail is only replaced when `changes` carries one.
    pub fn apply(&mut self, changes: PostChanges) {
        self.title = changes.title;
        self.category = changes.category;
        self.description = changes.description;
        if let Some(thumbnail) = changes.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
        self.updated_at = Utc::now();
    }
}

/// Field values written to the post store on create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: Option<String>,
}

/// Input of the create operation.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: Option<ThumbnailUpload>,
}

impl PostDraft {
    /// Check required fields and the thumbnail size.
    ///
    /// Returns the text fields (without a stored thumbnail name yet) and the
    /// upload to be written.
    pub fn validate(self) -> Result<(PostChanges, ThumbnailUpload), DomainError> {
        let thumbnail = match self.thumbnail {
            Some(thumbnail)
                if !self.title.is_empty()
                    && !self.category.is_empty()
                    && !self.description.is_empty() =>
            {
                thumbnail
            }
            _ => {
                return Err(DomainError::Validation(
                    "Fill in all the fields and choose thumbnail.".to_string(),
                ));
            }
        };

        if thumbnail.is_oversized() {
            return Err(DomainError::Validation(
                "File too big. Should be less than 2mb".to_string(),
            ));
        }

        Ok((
            PostChanges {
                title: self.title,
                category: self.category,
                description: self.description,
                thumbnail: None,
            },
            thumbnail,
        ))
    }
}

/// Input of the edit operation.
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: Option<ThumbnailUpload>,
}

impl PostEdit {
    /// Check the edited fields and, when present, the replacement thumbnail.
    pub fn validate(self) -> Result<(PostChanges, Option<ThumbnailUpload>), DomainError> {
        if self.title.is_empty()
            || self.category.is_empty()
            || self.description.chars().count() < MIN_DESCRIPTION_LEN
        {
            return Err(DomainError::Validation("Fill in all fields".to_string()));
        }

        if self.thumbnail.as_ref().is_some_and(ThumbnailUpload::is_oversized) {
            return Err(DomainError::Validation(
                "Thumbnail too big. should be less than 2mb.".to_string(),
            ));
        }

        Ok((
            PostChanges {
                title: self.title,
                category: self.category,
                description: self.description,
                thumbnail: None,
            },
            self.thumbnail,
        ))
    }
}
