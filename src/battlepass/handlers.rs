use super::models::{CreateLevelRequest, UpdateConfigRequest, UpdateLevelRequest, UploadResponse};
use super::services::BattlepassService;
use crate::auth::AdminUser;
use crate::common::{generate_raw_id, ApiError, AppState};
use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

pub(crate) const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// GET /api/battlepass/config - Season config (public)
pub async fn get_config(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let battlepass_service = BattlepassService::new(app_state.db.clone());

    let config = battlepass_service.get_config().await?;

    Ok(Json(config))
}

/// PATCH /api/battlepass/config - Update season config (admin only)
pub async fn update_config(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Json(request): Json<UpdateConfigRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let battlepass_service = BattlepassService::new(app_state.db.clone());

    let config = battlepass_service.update_config(request).await?;

    Ok(Json(config))
}

/// GET /api/battlepass/levels - Reward tiers ordered by level (public)
pub async fn list_levels(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let battlepass_service = BattlepassService::new(app_state.db.clone());

    let levels = battlepass_service.get_levels().await?;

    Ok(Json(levels))
}

/// POST /api/battlepass/levels - Add a reward tier (admin only)
pub async fn create_level(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Json(request): Json<CreateLevelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let battlepass_service = BattlepassService::new(app_state.db.clone());

    let level = battlepass_service.create_level(request).await?;

    Ok((StatusCode::CREATED, Json(level)))
}

/// PATCH /api/battlepass/levels/:id - Update a reward tier (admin only)
pub async fn update_level(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(level_id): Path<i64>,
    Json(request): Json<UpdateLevelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let battlepass_service = BattlepassService::new(app_state.db.clone());

    let level = battlepass_service.update_level(level_id, request).await?;

    Ok(Json(level))
}

/// POST /api/upload/battlepass-image - Upload a reward image (admin only)
pub async fn upload_image(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;

    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("image") {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let data = file_data.ok_or_else(|| ApiError::BadRequest("No image uploaded".to_string()))?;

    if data.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::BadRequest(
            "Image exceeds the 5MB upload limit".to_string(),
        ));
    }

    // Sniff the real content type rather than trusting the filename
    let extension = match infer::get(&data).map(|t| t.mime_type()) {
        Some("image/jpeg") => "jpg",
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        _ => {
            return Err(ApiError::BadRequest(
                "Uploaded file is not a valid image".to_string(),
            ))
        }
    };

    let filename = format!(
        "bp-{}-{}.{}",
        Utc::now().timestamp_millis(),
        generate_raw_id(6),
        extension
    );

    let file_path = app_state.uploads_dir.join(&filename);
    tokio::fs::write(&file_path, &data).await.map_err(|e| {
        error!(error = %e, file_path = %file_path.display(), "Failed to save uploaded image");
        ApiError::InternalServer("Failed to save image".to_string())
    })?;

    info!(filename = %filename, size = data.len(), "Battlepass image uploaded");

    Ok(Json(UploadResponse {
        image_url: format!("/uploads/{}", filename),
    }))
}

/// GET /uploads/:filename - Serve an uploaded image (public)
pub async fn serve_upload(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Path extractor yields a single segment, but stay paranoid about
    // traversal since the value names a file on disk
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::BadRequest("Invalid filename".to_string()));
    }

    let app_state = state.read().await;
    let file_path = app_state.uploads_dir.join(&filename);

    if !file_path.exists() {
        return Err(ApiError::NotFound("Image not found".to_string()));
    }

    let content = tokio::fs::read(&file_path)
        .await
        .map_err(|_| ApiError::InternalServer("Failed to read image".to_string()))?;

    let content_type = content_type_from_extension(&filename);

    Ok((
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, content_type)],
        content,
    ))
}

pub(crate) fn content_type_from_extension(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
