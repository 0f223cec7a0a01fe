//! Weekly challenge data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rotating weekly challenge shown on the public site
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct WeeklyChallenge {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub xp_reward: i64,
    pub is_active: bool,
}

#[derive(Deserialize, Debug)]
pub struct CreateChallengeRequest {
    pub title: String,
    pub description: String,
    pub xp_reward: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateChallengeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub xp_reward: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
