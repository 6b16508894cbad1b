use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;

use scribe_core::domain::User;
use scribe_core::ports::{BaseRepository, BlobStore, TokenService};
use scribe_infra::{
    InMemoryBlobStore, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

use super::configure_routes;
use crate::state::AppState;

const BOUNDARY: &str = "scribe-test-boundary";

struct TestEnv {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    users: Arc<InMemoryUserRepository>,
    blobs: Arc<InMemoryBlobStore>,
    author: User,
    bearer: String,
}

impl TestEnv {
    async fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let jwt = JwtConfig {
            secret: "handler-tests".to_string(),
            ..JwtConfig::default()
        };
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt.clone()));

        let author = users
            .insert(User::new("Lin".to_string(), "lin@example.com".to_string()))
            .await
            .unwrap();
        let token = sign(&jwt, &author);

        let state = AppState::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            users.clone(),
            blobs.clone(),
        );

        Self {
            state,
            tokens,
            users,
            blobs,
            author,
            bearer: format!("Bearer {token}"),
        }
    }

    async fn post_count(&self) -> i64 {
        self.users
            .find_by_id(self.author.id)
            .await
            .unwrap()
            .map(|u| u.posts)
            .unwrap()
    }
}

/// Mint a token the way the account service would.
fn sign(config: &JwtConfig, user: &User) -> String {
    let now = Utc::now();
    let claims = json!({
        "sub": user.id,
        "email": user.email,
        "iat": now.timestamp(),
        "exp": (now + TimeDelta::hours(1)).timestamp(),
        "iss": config.issuer,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap()
}

macro_rules! init_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.state.clone()))
                .app_data(web::Data::new($env.tokens.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Build a `multipart/form-data` body from text fields and an optional
/// `thumbnail` file.
fn multipart(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"thumbnail\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(req: test::TestRequest, body: Vec<u8>) -> test::TestRequest {
    req.insert_header((
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    ))
    .set_payload(body)
}

fn post_fields() -> [(&'static str, &'static str); 3] {
    [("title", "A"), ("category", "B"), ("description", "C")]
}

#[actix_web::test]
async fn test_health() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_create_post() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let thumbnail = vec![9u8; 1_500_000];
    let req = multipart_request(
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(&post_fields(), Some(("sunset.png", &thumbnail))),
    );
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let stored = body["thumbnail"].as_str().unwrap();
    assert!(stored.starts_with("sunset") && stored.ends_with(".png"));
    assert_eq!(body["creator"], json!(env.author.id));
    assert!(body.get("createdAt").is_some());
    assert!(env.blobs.exists(stored).await);
    assert_eq!(env.post_count().await, 1);
}

#[actix_web::test]
async fn test_create_requires_authentication() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let req = multipart_request(
        test::TestRequest::post().uri("/api/posts"),
        multipart(&post_fields(), Some(("a.png", b"png"))),
    );
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(env.post_count().await, 0);
}

#[actix_web::test]
async fn test_create_rejects_large_thumbnail() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let thumbnail = vec![0u8; 3_000_000];
    let req = multipart_request(
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(&post_fields(), Some(("huge.png", &thumbnail))),
    );
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 422);

    let list = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    let posts: Value = test::read_body_json(list).await;
    assert_eq!(posts, json!([]));
    assert!(env.blobs.is_empty().await);
    assert_eq!(env.post_count().await, 0);
}

#[actix_web::test]
async fn test_create_requires_thumbnail() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let req = multipart_request(
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(&post_fields(), None),
    );
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_unknown_category_is_empty_list() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/posts/categories/nonexistent")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_get_post_errors() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let missing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/not-an-id").to_request(),
    )
    .await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_edit_and_delete_flow() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    // create
    let req = multipart_request(
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(&post_fields(), Some(("first.jpg", b"jpeg bytes"))),
    );
    let created: Value = test::read_body_json(test::call_service(&app, req.to_request()).await).await;
    let id = created["id"].as_str().unwrap().to_string();
    let first_thumbnail = created["thumbnail"].as_str().unwrap().to_string();

    // JSON edit with an "empty" rich-text description is rejected
    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .set_json(json!({"title": "T", "category": "News", "description": "<p><br></p>"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // JSON edit keeps the thumbnail
    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .set_json(json!({"title": "T", "category": "News", "description": "<p>Hello world</p>"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let edited: Value = test::read_body_json(resp).await;
    assert_eq!(edited["title"], "T");
    assert_eq!(edited["thumbnail"], first_thumbnail.as_str());

    // multipart edit swaps the thumbnail
    let req = multipart_request(
        test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(
            &[
                ("title", "T2"),
                ("category", "News"),
                ("description", "<p>Second version</p>"),
            ],
            Some(("second.webp", b"webp bytes")),
        ),
    );
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: Value = test::read_body_json(resp).await;
    let second_thumbnail = replaced["thumbnail"].as_str().unwrap().to_string();
    assert!(second_thumbnail.ends_with(".webp"));
    assert!(!env.blobs.exists(&first_thumbnail).await);
    assert!(env.blobs.exists(&second_thumbnail).await);

    // delete
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], format!("Post {id} deleted successfully"));
    assert!(env.blobs.is_empty().await);
    assert_eq!(env.post_count().await, 0);

    // deleting again
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_without_id() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_posts_by_creator() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let req = multipart_request(
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, env.bearer.clone())),
        multipart(&post_fields(), Some(("a.png", b"png"))),
    );
    test::call_service(&app, req.to_request()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/users/{}", env.author.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_edit_with_malformed_json_is_problem_details() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"title\": ")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().is_some());
}

#[actix_web::test]
async fn test_edit_with_unsupported_body_is_problem_details() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, env.bearer.clone()))
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("title=T")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request");
}
