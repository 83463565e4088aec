//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::{Image, Post};
use quill_core::ports::Repository;
use quill_infra::{DatabaseConfig, MemoryRepository};

#[cfg(feature = "postgres")]
use quill_infra::database::{self, PostgresImageRepository, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn Repository<Post, i32>>,
    pub images: Arc<dyn Repository<Image, i32>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        match db_config {
            Some(config) => match database::connect(config).await {
                Ok(db) => {
                    tracing::info!("Application state initialized");
                    return Self {
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        images: Arc::new(PostgresImageRepository::new(db)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        Self::in_memory()
    }

    /// State backed by the in-memory store only.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(MemoryRepository::<Post>::new()),
            images: Arc::new(MemoryRepository::<Image>::new()),
        }
    }
}
