//! Data Transfer Objects - request/response types for the posts API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as returned by every posts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Stored file name of the thumbnail under the uploads directory.
    pub thumbnail: Option<String>,
    pub creator: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JSON body accepted by `PATCH /api/posts/{id}` when no new thumbnail is sent.
///
/// Absent fields default to empty and fail validation like blank ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditPostRequest {
    pub title: String,
    pub category: String,
    pub description: String,
}
