use super::models::{CreateChallengeRequest, MessageResponse, UpdateChallengeRequest};
use super::services::ChallengesService;
use crate::auth::AdminUser;
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/challenges - List active weekly challenges (public)
pub async fn list_challenges(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let challenges_service = ChallengesService::new(app_state.db.clone());

    let challenges = challenges_service.get_active_challenges().await?;

    Ok(Json(challenges))
}

/// POST /api/challenges - Create a challenge (admin only)
pub async fn create_challenge(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Json(request): Json<CreateChallengeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let challenges_service = ChallengesService::new(app_state.db.clone());

    let challenge = challenges_service.create_challenge(request).await?;

    Ok((StatusCode::CREATED, Json(challenge)))
}

/// PATCH /api/challenges/:id - Update a challenge (admin only)
pub async fn update_challenge(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(challenge_id): Path<i64>,
    Json(request): Json<UpdateChallengeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let challenges_service = ChallengesService::new(app_state.db.clone());

    let challenge = challenges_service
        .update_challenge(challenge_id, request)
        .await?;

    Ok(Json(challenge))
}

/// DELETE /api/challenges/:id - Remove a challenge (admin only)
pub async fn delete_challenge(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(challenge_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let challenges_service = ChallengesService::new(app_state.db.clone());

    challenges_service.delete_challenge(challenge_id).await?;

    Ok(Json(MessageResponse {
        message: "Challenge deleted successfully".to_string(),
    }))
}
