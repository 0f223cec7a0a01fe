//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /api/login` - Redirect to Discord authorization
/// - `GET /api/callback` - Discord OAuth callback
/// - `GET /api/auth/user` - Current user (session cookie or bearer token)
/// - `GET|POST /api/logout` - Revoke token and clear session
/// - `POST /api/admin/verify-code` - Break-glass admin promotion
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/login", get(handlers::begin_login))
        .route("/api/callback", get(handlers::handle_callback))
        .route("/api/auth/user", get(handlers::current_user))
        .route(
            "/api/logout",
            get(handlers::logout_redirect).post(handlers::logout_json),
        )
        .route("/api/admin/verify-code", post(handlers::verify_admin_code))
}
