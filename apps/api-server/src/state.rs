//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::PostService;
use scribe_core::ports::{BlobStore, PostRepository, UserRepository};
use scribe_infra::database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use scribe_infra::database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

type Stores = (Arc<dyn PostRepository>, Arc<dyn UserRepository>);

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

impl AppState {
    /// Build the state from already constructed adapters.
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            posts: PostService::new(posts, users, blobs),
        }
    }

    /// Build the application state, falling back to in-memory stores when no
    /// database is reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>, blobs: Arc<dyn BlobStore>) -> Self {
        let (posts, users) = Self::stores(db_config).await;
        tracing::info!("Application state initialized");
        Self::from_parts(posts, users, blobs)
    }

    #[cfg(feature = "postgres")]
    async fn stores(db_config: Option<&DatabaseConfig>) -> Stores {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return in_memory_stores();
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => (
                Arc::new(PostgresPostRepository::new(Arc::clone(&connections.main))),
                Arc::new(PostgresUserRepository::new(connections.main)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                in_memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_db_config: Option<&DatabaseConfig>) -> Stores {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        in_memory_stores()
    }
}
