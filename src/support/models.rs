//! Support request data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct SupportRequest {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub discord_username: Option<String>,
    pub category: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

/// Public submission body. Contact fields are optional; players often
/// only leave a Discord handle.
#[derive(Deserialize, Debug)]
pub struct SubmitSupportRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub discord_username: Option<String>,
    pub category: String,
    pub subject: String,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}
