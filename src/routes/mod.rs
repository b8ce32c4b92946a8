use crate::handlers::{health_check, serve_screen};
use crate::websocket::handler::websocket_handler;
use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create the application routes
pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_screen))
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .with_state(state)
}
