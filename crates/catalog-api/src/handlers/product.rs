//! Product CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use catalog_entity::product::Product;

use crate::dto::request::ProductRequest;
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiResult;
use crate::extractors::{PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/v1/products?page=&per_page=
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<Product>>>> {
    let page = state
        .product_service
        .list_products(params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let id = parse_id(&id)?;
    let product = state.product_service.get_product(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = state.product_service.create_product(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(product))))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let id = parse_id(&id)?;
    let product = state
        .product_service
        .update_product(id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    state.product_service.delete_product(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Product successfully deleted"
    })))
}
