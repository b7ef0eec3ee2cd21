//! Catalog store that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use catalog_core::config::DatabaseConfig;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryCatalogStore;
use crate::migration::run_migrations;
use crate::repositories::{
    CategoryRepository, PgCategoryRepository, PgProductRepository, ProductRepository,
};

/// Repository handles for the selected backend.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Category repository.
    pub categories: Arc<dyn CategoryRepository>,
    /// Product repository.
    pub products: Arc<dyn ProductRepository>,
    /// Connection pool, present only for the `postgres` provider.
    pool: Option<DatabasePool>,
}

impl CatalogStore {
    /// Build the store named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL catalog store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    categories: Arc::new(PgCategoryRepository::new(pool.pool().clone())),
                    products: Arc::new(PgProductRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory catalog store");
                Ok(Self::from_memory(MemoryCatalogStore::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Wrap an existing in-memory store (shared with the caller).
    pub fn from_memory(store: MemoryCatalogStore) -> Self {
        Self {
            categories: Arc::new(store.clone()),
            products: Arc::new(store),
            pool: None,
        }
    }

    /// Backend name for health reporting.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check backend connectivity. The memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
