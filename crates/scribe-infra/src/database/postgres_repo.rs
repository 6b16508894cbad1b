//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use scribe_core::domain::{Post, PostChanges};
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::Entity as UserEntity;
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::UpdatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(category, "Finding posts by category");

        let result = PostEntity::find()
            .filter(post::Column::Category.eq(category))
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Creator.eq(creator))
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn apply_changes(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        // Only the columns set here are written; the rest stay as stored.
        let mut active = post::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(id),
            title: Set(changes.title),
            category: Set(changes.category),
            description: Set(changes.description),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        if let Some(thumbnail) = changes.thumbnail {
            active.thumbnail = Set(Some(thumbnail));
        }

        match active.update(self.db.as_ref()).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }
}
