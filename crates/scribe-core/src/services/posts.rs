//! Post use cases.
//!
//! Every operation runs its blob and store calls strictly in sequence. There
//! are no transactions: a failure part-way leaves earlier steps in place.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostEdit, Principal, stored_filename};
use crate::error::DomainError;
use crate::ports::{BlobStore, PostRepository, UserRepository};

/// Coordinates the post store, the user store and blob storage.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            posts,
            users,
            blobs,
        }
    }

    /// Store the thumbnail, create the post and bump the creator's counter.
    ///
    /// A creator without a user record is rejected before anything is
    /// written, the same outcome the posts table's foreign key enforces.
    /// The counter step is not compensated: if it fails the post stays.
    pub async fn create(&self, principal: Principal, draft: PostDraft) -> Result<Post, DomainError> {
        let (mut fields, upload) = draft.validate()?;

        if self.users.find_by_id(principal.user_id).await?.is_none() {
            tracing::warn!(user_id = %principal.user_id, "Creator has no user record");
            return Err(DomainError::Persistence(
                "Post couldn't be created".to_string(),
            ));
        }

        let filename = stored_filename(&upload.file_name, Uuid::new_v4());
        self.blobs.put(&filename, &upload.data).await?;
        tracing::debug!(thumbnail = %filename, bytes = upload.size(), "Thumbnail stored");

        fields.thumbnail = Some(filename);
        let post = self
            .posts
            .insert(Post::new(principal.user_id, fields))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to insert post");
                DomainError::Persistence("Post couldn't be created".to_string())
            })?;

        self.adjust_post_count(principal.user_id, 1).await?;

        tracing::info!(post_id = %post.id, user_id = %principal.user_id, "Post created");
        Ok(post)
    }

    /// All posts, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all_recent().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_category(category).await?)
    }

    pub async fn by_creator(&self, creator: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_creator(creator).await?)
    }

    /// Update a post's text fields and optionally replace its thumbnail.
    ///
    /// Removing the old thumbnail is best-effort: a failure is logged and the
    /// edit carries on.
    pub async fn edit(
        &self,
        principal: Principal,
        id: Uuid,
        edit: PostEdit,
    ) -> Result<Post, DomainError> {
        let (mut changes, upload) = edit.validate()?;

        if let Some(upload) = upload {
            let existing = self.get(id).await?;
            if let Some(old) = existing.thumbnail.as_deref() {
                self.discard_blob(old).await;
            }

            let filename = stored_filename(&upload.file_name, Uuid::new_v4());
            self.blobs.put(&filename, &upload.data).await?;
            changes.thumbnail = Some(filename);
        }

        let updated = self
            .posts
            .apply_changes(id, changes)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Post {id} could not be updated")))?;

        tracing::info!(post_id = %id, user_id = %principal.user_id, "Post updated");
        Ok(updated)
    }

    /// Remove a post, its thumbnail, and one from the requester's counter.
    ///
    /// If the thumbnail cannot be removed the post record is left untouched.
    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), DomainError> {
        let post = self.get(id).await?;

        if let Some(thumbnail) = post.thumbnail.as_deref() {
            self.blobs.remove(thumbnail).await.map_err(|e| {
                tracing::error!(post_id = %id, thumbnail, error = %e, "Failed to delete thumbnail");
                DomainError::Storage(e)
            })?;
        }

        self.posts.delete(id).await?;
        self.adjust_post_count(principal.user_id, -1).await?;

        tracing::info!(post_id = %id, user_id = %principal.user_id, "Post deleted");
        Ok(())
    }

    /// Read-modify-write of the user's post counter. A user that has gone
    /// missing is skipped.
    async fn adjust_post_count(&self, user_id: Uuid, delta: i64) -> Result<(), DomainError> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            tracing::warn!(%user_id, delta, "User not found, post counter left unchanged");
            return Ok(());
        };

        self.users.update(user.with_post_delta(delta)).await?;
        Ok(())
    }

    async fn discard_blob(&self, name: &str) {
        if let Err(e) = self.blobs.remove(name).await {
            tracing::warn!(thumbnail = name, error = %e, "Failed to remove old thumbnail");
        }
    }
}
