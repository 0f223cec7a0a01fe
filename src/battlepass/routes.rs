use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn battlepass_routes() -> Router {
    Router::new()
        .route(
            "/api/battlepass/config",
            get(handlers::get_config).patch(handlers::update_config),
        )
        .route(
            "/api/battlepass/levels",
            get(handlers::list_levels).post(handlers::create_level),
        )
        .route(
            "/api/battlepass/levels/:id",
            axum::routing::patch(handlers::update_level),
        )
        .route("/api/upload/battlepass-image", post(handlers::upload_image))
        .route("/uploads/:filename", get(handlers::serve_upload))
}
