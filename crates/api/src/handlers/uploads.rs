//! Handler for admin image uploads.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use imi_core::error::CoreError;
use imi_core::program_image::{
    ensure_within_limit, validate_content_type, PROGRAM_IMAGE_HEIGHT, PROGRAM_IMAGE_WIDTH,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
    pub message: String,
}

/// POST /api/admin/upload/program-image
///
/// Accepts a multipart `image` field, checks its declared type and size,
/// then crops it to the program card canvas and stores it as JPEG.
pub async fn upload_program_image(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        validate_content_type(field.content_type())?;
        let filename = field.file_name().unwrap_or("image").to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        ensure_within_limit(data.len())?;

        let image_url = state
            .images
            .save_program_image(&filename, data.to_vec())
            .await?;
        tracing::info!(url = %image_url, admin = %admin.username, "Program image uploaded");

        return Ok(Json(UploadResponse {
            success: true,
            image_url,
            message: format!(
                "Image uploaded and resized to {PROGRAM_IMAGE_WIDTH}x{PROGRAM_IMAGE_HEIGHT}px"
            ),
        }));
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::TooLarge(
            "Image exceeds the upload size limit".into(),
        ))
    } else {
        AppError::BadRequest(e.body_text())
    }
}
