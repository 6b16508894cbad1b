use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - the author side of a post.
///
/// `posts` is a denormalized count of the posts this user created. It is kept
/// up to date with plain read-modify-write cycles, so concurrent writers for
/// the same user can lose an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub posts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, timestamps and no posts.
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            posts: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Return a copy with the post counter moved by `delta`.
    pub fn with_post_delta(mut self, delta: i64) -> Self {
        self.posts += delta;
        self.updated_at = Utc::now();
        self
    }
}
