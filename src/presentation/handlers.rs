// HTTP request handlers
use crate::application::navigation::find_action;
use crate::application::polling::LoadPhase;
use crate::infrastructure::chunked_json::chunked_json_stream;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use crate::presentation::extract::ApiPath;
use crate::presentation::view::DashboardView;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
pub struct MountResponse {
    pub id: Uuid,
    pub phase: LoadPhase,
}

#[derive(Serialize)]
pub struct RefreshAccepted {
    pub refreshing: bool,
}

#[derive(Serialize)]
pub struct NavigationResponse {
    pub action: &'static str,
    pub route: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Mount a new dashboard view: seed its store and start its timers
pub async fn mount_session(State(state): State<Arc<AppState>>) -> (StatusCode, Json<MountResponse>) {
    let session = state.registry.mount().await;
    (
        StatusCode::CREATED,
        Json(MountResponse {
            id: session.id(),
            phase: session.phase(),
        }),
    )
}

/// Render the current snapshot of a session
pub async fn get_session(
    ApiPath(id): ApiPath<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let session = state.session(id).await?;
    let view = DashboardView::of_session(&session);

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(|status| ApiError::Internal(format!("failed to encode view ({})", status)))
}

/// Stream a rendered view on every change until the session is torn down
pub async fn stream_session(
    ApiPath(id): ApiPath<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let session = state.session(id).await?;
    let compress = accepts_brotli(&headers);

    let views = async_stream::stream! {
        let _viewer = session.attach_viewer();
        // Subscribe before checking: a teardown after this point still wakes
        // the receiver, one before it is caught by the check.
        let mut watch = session.watch();

        while !session.is_torn_down() {
            yield DashboardView::of_session(&session);
            if !watch.changed().await {
                break;
            }
        }
        tracing::debug!(session = %session.id(), "View stream closed");
    };

    chunked_json_stream(views, compress)
        .map_err(|status| ApiError::Internal(format!("failed to open stream ({})", status)))
}

/// Start a refresh; rejected while one is already running
pub async fn refresh_session(
    ApiPath(id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<RefreshAccepted>)> {
    let session = state.session(id).await?;
    let ticket = session
        .refresh()
        .try_begin()
        .ok_or(ApiError::RefreshInProgress)?;

    tokio::spawn(async move {
        let outcome = ticket.execute().await;
        tracing::debug!(session = %id, ?outcome, "Refresh finished");
    });

    Ok((StatusCode::ACCEPTED, Json(RefreshAccepted { refreshing: true })))
}

/// Resolve a quick action and hand its route to the navigator
pub async fn trigger_action(
    ApiPath((id, action)): ApiPath<(Uuid, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<NavigationResponse>> {
    state.session(id).await?;
    let action = find_action(&action).ok_or(ApiError::UnknownAction(action))?;
    let route = state.navigator.navigate(action.route);

    Ok(Json(NavigationResponse {
        action: action.id,
        route,
    }))
}

/// Unmount a dashboard view, releasing its timers
pub async fn teardown_session(
    ApiPath(id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .registry
        .teardown(id)
        .await
        .ok_or(ApiError::SessionNotFound(id))?;
    Ok(StatusCode::NO_CONTENT)
}
