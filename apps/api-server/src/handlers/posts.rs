//! Post handlers.
//!
//! Each handler extracts its inputs, hands them to [`PostService`] and renders
//! the outcome. Mutating routes require an [`Identity`].
//!
//! [`PostService`]: scribe_core::PostService

use actix_multipart::Multipart;
use actix_web::guard::GuardContext;
use actix_web::http::header;
use actix_web::{HttpResponse, web};

use scribe_core::domain::{Post, PostEdit};
use scribe_core::services::parse_id;
use scribe_shared::MessageResponse;
use scribe_shared::dto::{EditPostRequest, PostResponse};

use super::form::PostForm;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        category: post.category,
        description: post.description,
        thumbnail: post.thumbnail,
        creator: post.creator,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(to_response).collect()
}

/// Route guard selecting the multipart variant of PATCH.
pub fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload).await?;
    let post = state.posts.create(identity.principal(), form.into()).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id("Post", &path)?;
    let post = state.posts.get(id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /api/posts/categories/{category}
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.by_category(&path).await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// GET /api/posts/users/{id}
pub async fn creator_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let creator = parse_id("User", &path)?;
    let posts = state.posts.by_creator(creator).await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// PATCH /api/posts/{id} with a multipart body, optionally carrying a new
/// thumbnail.
pub async fn edit_post_multipart(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = parse_id("Post", &path)?;
    let form = PostForm::read(payload).await?;
    let post = state
        .posts
        .edit(identity.principal(), id, form.into())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /api/posts/{id} with a JSON body (text fields only).
pub async fn edit_post_json(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<EditPostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id("Post", &path)?;
    let req = body.into_inner();
    let edit = PostEdit {
        title: req.title,
        category: req.category,
        description: req.description,
        thumbnail: None,
    };
    let post = state.posts.edit(identity.principal(), id, edit).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id("Post", &path)?;
    state.posts.delete(identity.principal(), id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post {} deleted successfully",
        id
    ))))
}

/// DELETE /api/posts - the id is missing from the route.
pub async fn delete_post_without_id(identity: Identity) -> AppResult<HttpResponse> {
    tracing::debug!(user_id = %identity.user_id, "Delete requested without a post id");
    Err(AppError::BadRequest("Post not found".to_string()))
}
