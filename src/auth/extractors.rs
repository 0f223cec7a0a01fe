//! Authentication extractors for Axum
//!
//! `AuthedUser` resolves the calling identity from either the session
//! cookie or a bearer token; `AdminUser` additionally requires the admin
//! flag or the break-glass access code header.

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::User;
use crate::common::{ApiError, AppState};

/// Cookie carrying the session-equivalent token on browsers where
/// cross-site cookie delivery works
pub const SESSION_COOKIE: &str = "asylum_session";

/// Header for the operator break-glass admin bypass
pub const ADMIN_CODE_HEADER: &str = "x-admin-code";

/// Pull the session token out of a Cookie header value
pub fn session_token_from_cookies(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let pair = pair.trim();
        pair.strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    })
}

/// Resolve the presented credential: session cookie first (authoritative
/// and cheaper), then the Authorization bearer header.
pub fn credential_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(session_token_from_cookies)
    {
        return Some(token);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|raw| raw.strip_prefix("Bearer ").unwrap_or(raw).to_string())
        .filter(|t| !t.is_empty())
}

/// Authenticated user extractor
///
/// Validates the presented token against the token store and loads the
/// user row bound to it.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
    pub discord_id: String,
    pub username: String,
    pub is_admin: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let token = match credential_from_headers(&parts.headers) {
            Some(t) => t,
            None => {
                warn!("Authentication failed: no session cookie or bearer token");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        // Expired and unknown tokens get the same answer so validity
        // cannot be probed
        let discord_id = match app_state.token_store.validate(&token) {
            Some(id) => id,
            None => {
                warn!("Authentication failed: invalid or expired token");
                return Err(ApiError::Unauthorized("invalid token".into()));
            }
        };

        let user: Option<User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE discord_id = ?")
                .bind(&discord_id)
                .fetch_optional(&app_state.db)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        discord_id = %discord_id,
                        "Database error during user lookup in authentication"
                    );
                    ApiError::DatabaseError(e)
                })?;

        match user {
            Some(u) => {
                debug!(
                    user_id = %u.id,
                    discord_id = %u.discord_id,
                    is_admin = u.is_admin,
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    id: u.id,
                    discord_id: u.discord_id,
                    username: u.username,
                    is_admin: u.is_admin,
                })
            }
            None => {
                warn!(discord_id = %discord_id, "Authentication failed: user not found in database");
                Err(ApiError::Unauthorized("user not found".into()))
            }
        }
    }
}

/// Admin gate for privileged routes.
///
/// The break-glass path skips identity resolution entirely: a matching
/// x-admin-code header grants access with `user` left as None. Every use
/// is audit-logged. Without the header the caller must authenticate and
/// carry the admin flag.
#[derive(Debug)]
pub struct AdminUser {
    pub user: Option<AuthedUser>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let admin_access_code = {
            let app_state = state_lock.read().await;
            app_state.admin_access_code.clone()
        };

        let presented_code = parts
            .headers
            .get(ADMIN_CODE_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim().to_string());

        if let (Some(configured), Some(presented)) = (&admin_access_code, &presented_code) {
            if !configured.is_empty() && configured == presented {
                warn!(
                    uri = %parts.uri,
                    "Break-glass admin access code used - bypassing identity resolution"
                );
                return Ok(AdminUser { user: None });
            }
        }

        let authed = AuthedUser::from_request_parts(parts, state).await?;

        if !authed.is_admin {
            warn!(
                user_id = %authed.id,
                uri = %parts.uri,
                "Admin access denied: user lacks admin flag"
            );
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminUser { user: Some(authed) })
    }
}
