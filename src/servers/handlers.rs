use super::models::{CreateServerRequest, MessageResponse, UpdateServerRequest};
use super::services::ServersService;
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

/// GET /api/servers - List all game servers (public)
pub async fn list_servers(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let servers_service = ServersService::new(app_state.db.clone());

    let servers = servers_service.get_all_servers().await?;

    Ok(Json(servers))
}

/// POST /api/servers - Create a server card (admin only)
pub async fn create_server(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Json(request): Json<CreateServerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let servers_service = ServersService::new(app_state.db.clone());

    let server = servers_service.create_server(request).await?;

    Ok((StatusCode::CREATED, Json(server)))
}

/// PATCH /api/servers/:id - Update a server card (admin only)
pub async fn update_server(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(server_id): Path<i64>,
    Json(request): Json<UpdateServerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let servers_service = ServersService::new(app_state.db.clone());

    let server = servers_service.update_server(server_id, request).await?;

    Ok(Json(server))
}

/// DELETE /api/servers/:id - Remove a server card (admin only)
pub async fn delete_server(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _admin: AdminUser,
    Path(server_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let servers_service = ServersService::new(app_state.db.clone());

    servers_service.delete_server(server_id).await?;

    Ok(Json(MessageResponse {
        message: "Server deleted successfully".to_string(),
    }))
}
