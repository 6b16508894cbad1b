//! In-memory stores - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Post, PostChanges, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory post store backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching posts sorted descending by the timestamp `newest_by` picks.
    async fn collect<F>(&self, keep: F, newest_by: fn(&Post) -> DateTime<Utc>) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| newest_by(b).cmp(&newest_by(a)));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&post.id).map(|existing| {
            *existing = post;
            existing.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all_recent(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|_| true, |p| p.updated_at).await)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.category == category, |p| p.created_at).await)
    }

    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.creator == creator, |p| p.created_at).await)
    }

    async fn apply_changes(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&id).map(|post| {
            post.apply(changes);
            post.clone()
        }))
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<Option<User>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&user.id).map(|existing| {
            *existing = user;
            existing.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(category: &str, creator: Uuid, age_secs: i64) -> Post {
        let mut post = Post::new(
            creator,
            PostChanges {
                title: format!("{category} post"),
                category: category.to_string(),
                description: "description".to_string(),
                thumbnail: None,
            },
        );
        post.created_at = Utc::now() - Duration::seconds(age_secs);
        post.updated_at = post.created_at;
        post
    }

    #[tokio::test]
    async fn test_category_is_exact_and_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let old = repo.insert(post("Art", author, 300)).await.unwrap();
        let new = repo.insert(post("Art", author, 10)).await.unwrap();
        repo.insert(post("art", author, 5)).await.unwrap();

        let found = repo.find_by_category("Art").await.unwrap();
        let ids: Vec<Uuid> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
    }

    #[tokio::test]
    async fn test_recent_orders_by_updated_at() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let first = repo.insert(post("News", author, 600)).await.unwrap();
        let second = repo.insert(post("News", author, 60)).await.unwrap();

        // touching the older post moves it to the front
        repo.apply_changes(
            first.id,
            PostChanges {
                title: "edited".to_string(),
                category: "News".to_string(),
                description: "edited description".to_string(),
                thumbnail: None,
            },
        )
        .await
        .unwrap();

        let ids: Vec<Uuid> = repo
            .find_all_recent()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_apply_changes_on_missing_post() {
        let repo = InMemoryPostRepository::new();
        let result = repo
            .apply_changes(
                Uuid::new_v4(),
                PostChanges {
                    title: "t".to_string(),
                    category: "c".to_string(),
                    description: "d".to_string(),
                    thumbnail: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_user_update_and_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(User::new("Ada".to_string(), "ada@example.com".to_string()))
            .await
            .unwrap();

        let bumped = repo.update(user.clone().with_post_delta(1)).await.unwrap();
        assert_eq!(bumped.map(|u| u.posts), Some(1));

        repo.delete(user.id).await.unwrap();
        assert!(matches!(repo.delete(user.id).await, Err(RepoError::NotFound)));
        assert!(repo.update(user).await.unwrap().is_none());
    }
}
