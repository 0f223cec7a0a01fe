// src/main.rs
use axum::{
    extract::{DefaultBodyLimit, Extension},
    middleware, Router,
};
use dotenv::dotenv;
use reqwest::Client;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod battlepass;
mod challenges;
mod chat;
mod common;
mod logging_middleware;
mod servers;
mod services;
mod support;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use auth::token_store::TokenStore;
use common::AppState;
use services::{DiscordService, OpenAIService};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://asylum.db".to_string());
    let uploads_dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string());
    let admin_access_code = env::var("ADMIN_ACCESS_CODE").ok();
    let discord_client_id = env::var("DISCORD_CLIENT_ID").ok();
    let discord_client_secret = env::var("DISCORD_CLIENT_SECRET").ok();
    let openai_api_key = env::var("OPENAI_API_KEY").ok();
    let openai_chat_model =
        env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
    let openai_vision_model =
        env::var("OPENAI_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

    if admin_access_code.is_none() {
        info!("ADMIN_ACCESS_CODE not set - break-glass admin bypass disabled");
    }

    // ========================================================================
    // DIRECTORY SETUP
    // ========================================================================

    tokio::fs::create_dir_all(&uploads_dir).await?;

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    // Run database migrations
    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let http_client = Client::builder().no_proxy().build()?;

    let discord_service = Arc::new(DiscordService::new(
        discord_client_id,
        discord_client_secret,
        http_client.clone(),
    ));
    info!("DiscordService initialized");

    let openai_service = Arc::new(OpenAIService::new(
        openai_api_key,
        openai_chat_model,
        openai_vision_model,
        http_client.clone(),
    ));
    info!("OpenAIService initialized");

    let token_store = TokenStore::new();
    TokenStore::start_sweep_task(token_store.clone());
    info!("Token sweep task started");

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        http: http_client,
        uploads_dir: PathBuf::from(uploads_dir),
        admin_access_code,
        token_store,
        discord_service,
        openai_service,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES (OAuth, session, admin verification)
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // SERVER CARD ROUTES (Public list and admin management)
        // ====================================================================
        .merge(servers::servers_routes())
        // ====================================================================
        // BATTLEPASS ROUTES (Config, levels, image upload/serving)
        // ====================================================================
        .merge(battlepass::battlepass_routes())
        // ====================================================================
        // SUPPORT ROUTES (Public intake and admin triage)
        // ====================================================================
        .merge(support::support_routes())
        // ====================================================================
        // CHALLENGE ROUTES (Weekly rotation)
        // ====================================================================
        .merge(challenges::challenges_routes())
        // ====================================================================
        // CHAT ROUTES (AI helper)
        // ====================================================================
        .merge(chat::chat_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        // Raise the framework's 2MB default so the upload handlers' own
        // size caps apply
        .layer(DefaultBodyLimit::max(common::MAX_BODY_BYTES))
        .layer(Extension(shared.clone()))
        .layer({
            // Get CORS origins from environment variable
            let cors_origins = std::env::var("CORS_ORIGINS").unwrap_or_else(|_| {
                "http://localhost:3000,http://localhost:5173".to_string()
            });

            let origins: Vec<axum::http::HeaderValue> = cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::PATCH,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::HeaderName::from_static("x-admin-code"),
                ])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
