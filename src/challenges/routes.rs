use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

pub fn challenges_routes() -> Router {
    Router::new()
        .route(
            "/api/challenges",
            get(handlers::list_challenges).post(handlers::create_challenge),
        )
        .route(
            "/api/challenges/:id",
            patch(handlers::update_challenge).delete(handlers::delete_challenge),
        )
}
