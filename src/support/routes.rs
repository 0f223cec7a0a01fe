use axum::{
    routing::{patch, post},
    Router,
};

use super::handlers;

pub fn support_routes() -> Router {
    Router::new()
        .route(
            "/api/support",
            post(handlers::submit_request).get(handlers::list_requests),
        )
        .route("/api/support/:id", patch(handlers::update_status))
}
