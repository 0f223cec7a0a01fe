//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model, keyed by Discord id with a unique constraint
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub discord_id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Query parameters Discord sends to the OAuth callback
#[derive(Deserialize, Debug)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Body for the admin verify-code endpoint
#[derive(Deserialize)]
pub struct VerifyCodePayload {
    pub code: Option<String>,
}

/// Response body for verify-code
#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
}
