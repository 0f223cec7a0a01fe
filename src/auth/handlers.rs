//! Authentication handlers
//!
//! The login flow: `/api/login` redirects the browser to Discord with a
//! callback bound to the requesting host; `/api/callback` exchanges the
//! code, upserts the user, mints a week-long bearer token and delivers it
//! twice - as an HttpOnly session cookie and as a `?authToken=` query
//! parameter. The URL parameter exists because cross-site cookie delivery
//! is unreliable on some mobile browsers; both carry the same credential.

use axum::{
    extract::{Extension, Json, Query},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::{credential_from_headers, AuthedUser, SESSION_COOKIE};
use super::models::{CallbackQuery, User, VerifyCodePayload, VerifyCodeResponse};
use super::token_store::TOKEN_TTL_DAYS;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};
use crate::services::discord::{DiscordError, DiscordProfile};

const AUTH_FAILED_REDIRECT: &str = "/?auth=failed";

fn oauth_error(e: DiscordError) -> ApiError {
    match e {
        DiscordError::NotConfigured => ApiError::ServiceUnavailable(
            "Discord login not configured. Please add DISCORD_CLIENT_ID and DISCORD_CLIENT_SECRET."
                .to_string(),
        ),
        other => ApiError::InternalServer(format!("OAuth flow failed: {}", other)),
    }
}

/// Callback URL bound to the requesting host, so every deployment
/// hostname round-trips through the same handler pair
fn callback_url(host: &str) -> String {
    let scheme = if host.starts_with("localhost") || host.starts_with("127.") {
        "http"
    } else {
        "https"
    };
    format!("{}://{}/api/callback", scheme, host)
}

fn request_host(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::BadRequest("missing Host header".to_string()))
}

fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        TOKEN_TTL_DAYS * 24 * 60 * 60
    )
}

fn clear_session_cookie() -> String {
    format!(
        "{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    )
}

/// GET /api/login
/// Redirects the browser to Discord's authorization page.
/// Responds 503 when Discord credentials are not configured.
pub async fn begin_login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    let state = state_lock.read().await.clone();

    if !state.discord_service.is_configured() {
        return Err(oauth_error(DiscordError::NotConfigured));
    }

    let host = request_host(&headers)?;
    let redirect_uri = callback_url(&host);
    let login_state = state.token_store.issue_login_state();

    let auth_url = state
        .discord_service
        .authorization_url(&redirect_uri, &login_state)
        .map_err(oauth_error)?;

    info!(host = %host, "Starting Discord OAuth flow");
    Ok(Redirect::to(&auth_url))
}

/// GET /api/callback
/// Discord redirect target. Provider failures never surface as errors to
/// the browser; every failure path lands on `/?auth=failed` and the user
/// tries again.
pub async fn handle_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<CallbackQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state_lock.read().await.clone();

    if let Some(error) = params.error {
        warn!(oauth_error = %error, "Discord OAuth returned error");
        return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
    }

    let (code, login_state) = match (params.code, params.state) {
        (Some(code), Some(login_state)) => (code, login_state),
        _ => {
            warn!("OAuth callback missing code or state");
            return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
        }
    };

    if !state.token_store.consume_login_state(&login_state) {
        warn!("OAuth callback presented unknown or expired login state");
        return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
    }

    let host = match request_host(&headers) {
        Ok(host) => host,
        Err(_) => return Redirect::to(AUTH_FAILED_REDIRECT).into_response(),
    };
    let redirect_uri = callback_url(&host);

    let token_response = match state
        .discord_service
        .exchange_code(&code, &redirect_uri)
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!(error = %e, "Discord code exchange failed");
            return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
        }
    };

    let profile = match state
        .discord_service
        .fetch_profile(&token_response.access_token)
        .await
    {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "Discord profile fetch failed");
            return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
        }
    };

    let user = match upsert_user(&state.db, &profile).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, discord_id = %profile.id, "User upsert failed during OAuth callback");
            return Redirect::to(AUTH_FAILED_REDIRECT).into_response();
        }
    };

    let token = state.token_store.issue(&user.discord_id);

    info!(
        user_id = %user.id,
        discord_id = %user.discord_id,
        "User authentication successful via Discord OAuth"
    );

    // Cookie delivery is best-effort; the token in the redirect URL is the
    // fallback transport for browsers that drop it
    (
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Redirect::to(&format!("/?authToken={}", token)),
    )
        .into_response()
}

/// Insert-or-update the user row keyed by Discord id, refreshing the
/// profile fields on every login
pub(crate) async fn upsert_user(
    db: &SqlitePool,
    profile: &DiscordProfile,
) -> Result<User, ApiError> {
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (id, discord_id, username, email, avatar_url, is_admin, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 0, ?, ?)
        ON CONFLICT(discord_id) DO UPDATE SET
            username = excluded.username,
            email = excluded.email,
            avatar_url = excluded.avatar_url,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(generate_user_id())
    .bind(&profile.id)
    .bind(&profile.username)
    .bind(&profile.email)
    .bind(profile.avatar_url())
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if let Some(email) = &profile.email {
        info!(
            discord_id = %profile.id,
            email = %safe_email_log(email),
            "Upserted user from Discord profile"
        );
    }

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE discord_id = ?")
        .bind(&profile.id)
        .fetch_one(db)
        .await
        .map_err(ApiError::DatabaseError)
}

/// GET /api/auth/user
/// Returns the current authenticated user's profile (session or bearer)
pub async fn current_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<User>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(user))
}

async fn revoke_presented_token(state: &AppState, headers: &HeaderMap) {
    if let Some(token) = credential_from_headers(headers) {
        state.token_store.revoke(&token);
    }
}

/// GET /api/logout
/// Browser-facing logout: revoke the token, clear the cookie, go home
pub async fn logout_redirect(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state_lock.read().await.clone();
    revoke_presented_token(&state, &headers).await;

    info!("User logout successful");
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
}

/// POST /api/logout
/// API-facing logout for clients holding the bearer token
pub async fn logout_json(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state_lock.read().await.clone();
    revoke_presented_token(&state, &headers).await;

    info!("User logout successful");
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(serde_json::json!({ "message": "Logout successful" })),
    )
}

/// POST /api/admin/verify-code
/// Trades the break-glass access code for a permanent admin flag on the
/// caller's account. Works without a login too (the code alone is the
/// capability), in which case nothing is persisted.
pub async fn verify_admin_code(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: Option<AuthedUser>,
    Json(payload): Json<VerifyCodePayload>,
) -> Result<Json<VerifyCodeResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let configured = state
        .admin_access_code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid code".to_string()))?;

    let presented = payload.code.unwrap_or_default();
    let presented = presented.trim();

    if presented.is_empty() || presented != configured {
        return Err(ApiError::Unauthorized("Invalid code".to_string()));
    }

    if let Some(user) = authed {
        if !user.is_admin {
            sqlx::query("UPDATE users SET is_admin = 1, updated_at = ? WHERE id = ?")
                .bind(Utc::now().to_rfc3339())
                .bind(&user.id)
                .execute(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?;

            warn!(
                user_id = %user.id,
                "Admin access code accepted - user promoted to permanent admin"
            );
        }
    } else {
        warn!("Admin access code accepted by unauthenticated caller");
    }

    Ok(Json(VerifyCodeResponse { success: true }))
}
