//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use catalog_core::config::AppConfig;
use catalog_database::CatalogStore;
use catalog_service::{CategoryService, ProductService};
use catalog_storage::ImagePipeline;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Repository handles for the configured backend
    pub store: CatalogStore,
    /// Image upload pipeline
    pub images: Arc<ImagePipeline>,
    /// Category service
    pub category_service: Arc<CategoryService>,
    /// Product service
    pub product_service: Arc<ProductService>,
}

impl AppState {
    /// Wires the services over the given store.
    pub fn new(config: AppConfig, store: CatalogStore, images: ImagePipeline) -> Self {
        let category_service = Arc::new(CategoryService::new(Arc::clone(&store.categories)));
        let product_service = Arc::new(ProductService::new(
            Arc::clone(&store.products),
            Arc::clone(&store.categories),
        ));

        Self {
            config: Arc::new(config),
            store,
            images: Arc::new(images),
            category_service,
            product_service,
        }
    }
}
