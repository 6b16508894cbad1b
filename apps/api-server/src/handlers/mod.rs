//! HTTP handlers and route configuration.

mod form;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{guard, web};

use crate::middleware::error::AppError;

/// Malformed or non-JSON bodies get the same problem-details response as
/// every other client error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("", web::delete().to(posts::delete_post_without_id))
                    .route(
                        "/categories/{category}",
                        web::get().to(posts::category_posts),
                    )
                    .route("/users/{id}", web::get().to(posts::creator_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route(
                        "/{id}",
                        web::patch()
                            .guard(guard::fn_guard(posts::is_multipart))
                            .to(posts::edit_post_multipart),
                    )
                    .route("/{id}", web::patch().to(posts::edit_post_json))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}
