//! Category CRUD and tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use catalog_entity::category::{Category, CategoryAggregate, CategoryWithCount};

use crate::dto::request::CategoryRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryWithCount>>>> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/v1/categories/tree
pub async fn get_tree(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryAggregate>>>> {
    let tree = state.category_service.category_tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let id = parse_id(&id)?;
    let category = state.category_service.get_category(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let category = state.category_service.create_category(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let id = parse_id(&id)?;
    let category = state
        .category_service
        .update_category(id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    state.category_service.delete_category(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Category successfully deleted"
    })))
}
