use axum::{routing::post, Router};

use super::handlers;

pub fn chat_routes() -> Router {
    Router::new().route("/api/chat", post(handlers::chat))
}
