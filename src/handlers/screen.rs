use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::services::screen_service;
use crate::AppState;

/// Client helper injected into every served screen.
const HELPER_SOURCE: &str = include_str!("../helper.js");

/// Serve the current screen document with the client helper injected.
///
/// The document is read fresh on every request, so the most recent pushed
/// content is served even between reload notifications.
pub async fn serve_screen(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.config.screen).await {
        Ok(raw) => Html(screen_service::inject_helper(&raw, HELPER_SOURCE)).into_response(),
        Err(e) => {
            warn!(file = %state.config.screen.display(), err = %e, "failed to read screen document");
            (StatusCode::INTERNAL_SERVER_ERROR, "screen document unavailable").into_response()
        }
    }
}
