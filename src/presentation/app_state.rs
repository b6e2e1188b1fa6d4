// Application state for HTTP handlers
use crate::application::navigation::Navigator;
use crate::application::session::{DashboardSession, SessionRegistry};
use crate::presentation::error::{ApiError, ApiResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct AppState {
    pub registry: SessionRegistry,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    pub async fn session(&self, id: Uuid) -> ApiResult<Arc<DashboardSession>> {
        self.registry
            .get(id)
            .await
            .ok_or(ApiError::SessionNotFound(id))
    }
}
