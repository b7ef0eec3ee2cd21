//! Route definitions for the catalog HTTP API.
//!
//! Resource routes are mounted under the configured API prefix
//! (`/api/v1` by default) and composed images are served under
//! `<public_prefix>/images`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the Axum router with all routes and the request logger.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.images.max_upload_bytes() + MULTIPART_OVERHEAD;
    let images_path = format!(
        "{}/images",
        state.config.images.public_prefix.trim_end_matches('/')
    );

    let api_routes = Router::new()
        .merge(category_routes())
        .merge(product_routes())
        .merge(image_routes())
        .merge(health_routes());

    Router::new()
        .nest(&state.config.server.api_prefix, api_routes)
        .nest_service(&images_path, ServeDir::new(state.images.output_dir()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Category CRUD and tree
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route("/categories/tree", get(handlers::category::get_tree))
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

/// Product CRUD
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}

/// Image upload
fn image_routes() -> Router<AppState> {
    Router::new().route("/image/upload", post(handlers::image::upload_image))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
