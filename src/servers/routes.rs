use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

pub fn servers_routes() -> Router {
    Router::new()
        .route(
            "/api/servers",
            get(handlers::list_servers).post(handlers::create_server),
        )
        .route(
            "/api/servers/:id",
            patch(handlers::update_server).delete(handlers::delete_server),
        )
}
