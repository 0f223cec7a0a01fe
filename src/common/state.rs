// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::token_store::TokenStore;
use crate::services::{DiscordService, OpenAIService};

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    pub uploads_dir: PathBuf,
    /// Break-glass admin access code, sourced from ADMIN_ACCESS_CODE.
    /// Bypass is disabled entirely when unset.
    pub admin_access_code: Option<String>,
    pub token_store: TokenStore,
    pub discord_service: Arc<DiscordService>,
    pub openai_service: Arc<OpenAIService>,
}
