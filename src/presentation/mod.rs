// Presentation layer - HTTP surface and render model
pub mod app_state;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod view;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_session, health_check, mount_session, refresh_session, stream_session, teardown_session,
    trigger_action,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/sessions", post(mount_session))
        .route("/sessions/:id", get(get_session).delete(teardown_session))
        .route("/sessions/:id/stream", get(stream_session))
        .route("/sessions/:id/refresh", post(refresh_session))
        .route("/sessions/:id/actions/:action", post(trigger_action))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
