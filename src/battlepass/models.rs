//! Battlepass data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Season-wide battlepass settings, a singleton row
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct BattlepassConfig {
    pub id: i64,
    pub season_name: String,
    pub days_left: i64,
    pub theme_color: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateConfigRequest {
    pub season_name: Option<String>,
    pub days_left: Option<i64>,
    pub theme_color: Option<String>,
}

/// One reward tier of the battlepass track
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct BattlepassLevel {
    pub id: i64,
    pub level: i64,
    pub free_reward: String,
    pub premium_reward: String,
    pub image_url: Option<String>,
    pub free_image_url: Option<String>,
    pub premium_image_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateLevelRequest {
    pub level: i64,
    pub free_reward: String,
    pub premium_reward: String,
    pub image_url: Option<String>,
    pub free_image_url: Option<String>,
    pub premium_image_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateLevelRequest {
    pub level: Option<i64>,
    pub free_reward: Option<String>,
    pub premium_reward: Option<String>,
    pub image_url: Option<String>,
    pub free_image_url: Option<String>,
    pub premium_image_url: Option<String>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
