//! Game server data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::serialize_features;

/// A server card shown on the public site
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct Server {
    pub id: i64,
    pub name: String,
    pub map: String,
    pub description: String,
    pub multiplier: String,
    /// Stored as a JSON array string, served as an array
    #[serde(serialize_with = "serialize_features")]
    pub features: Option<String>,
    pub connection_info: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateServerRequest {
    pub name: String,
    pub map: String,
    pub description: String,
    pub multiplier: String,
    pub features: Option<Vec<String>>,
    pub connection_info: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateServerRequest {
    pub name: Option<String>,
    pub map: Option<String>,
    pub description: Option<String>,
    pub multiplier: Option<String>,
    pub features: Option<Vec<String>>,
    pub connection_info: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
