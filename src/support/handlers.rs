use super::models::{SubmitResponse, SubmitSupportRequest, UpdateStatusRequest};
use super::services::SupportService;
use crate::auth::AdminUser;
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// POST /api/support - Submit a new support request (public)
pub async fn submit_request(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<SubmitSupportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let support_service = SupportService::new(app_state.db.clone());

    support_service.create_request(request).await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Support request submitted successfully".to_string(),
    }))
}

/// GET /api/support - List all support requests (admin only)
pub async fn list_requests(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let support_service = SupportService::new(app_state.db.clone());

    let requests = support_service.get_all_requests().await?;

    Ok(Json(requests))
}

/// PATCH /api/support/:id - Update a request's status (admin only)
pub async fn update_status(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(request_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let support_service = SupportService::new(app_state.db.clone());

    let updated = support_service.update_status(request_id, request).await?;

    Ok(Json(updated))
}
