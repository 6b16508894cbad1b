//! # Scribe API Server
//!
//! Actix-web entry point for the blog-post service.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Condition, web};
use tracing_actix_web::TracingLogger;

use scribe_core::ports::{BlobStore, RateLimiter, TokenService};
use scribe_infra::{InMemoryRateLimiter, JwtTokenService, LocalBlobStore};

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use state::AppState;
use telemetry::{LogFormat, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(LogFormat::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Scribe API Server on {}:{}",
        config.host,
        config.port
    );

    let blobs: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::open(config.uploads_dir.clone())
            .await
            .map_err(std::io::Error::other)?,
    );

    let state = AppState::new(config.database.as_ref(), blobs).await;
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::from_env());
    let rate_limit_enabled = config.rate_limit_enabled;

    if !rate_limit_enabled {
        tracing::warn!("Rate limiting disabled");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(
                rate_limit_enabled,
                RateLimitMiddleware::new(limiter.clone()),
            ))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
