use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Returns `None` when no row matched.
    async fn update(&self, entity: T) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {}

/// Post repository with the listing queries the handlers need.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, most recently updated first.
    async fn find_all_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose category equals `category` exactly, newest first.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts written by `creator`, newest first.
    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Write the editable fields of a post without reading it first.
    ///
    /// Returns the updated post, or `None` if no post has this id.
    async fn apply_changes(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError>;
}
