//! Image upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use catalog_core::error::AppError;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/v1/image/upload
///
/// Takes the first file part of a multipart body and returns the public
/// path of the composed square image.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<String>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        if data.len() > state.images.max_upload_bytes() {
            return Err(AppError::validation(format!(
                "Image exceeds {} bytes",
                state.images.max_upload_bytes()
            ))
            .into());
        }

        let path = state.images.process_upload(&mime_type, data).await?;
        return Ok((StatusCode::CREATED, Json(ApiResponse::ok(path))));
    }

    Err(AppError::validation("Image is required").into())
}
