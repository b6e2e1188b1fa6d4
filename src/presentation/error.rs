// API error types and their HTTP mapping
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("dashboard session {0} not found")]
    SessionNotFound(Uuid),

    #[error("unknown quick action: {0}")]
    UnknownAction(String),

    #[error("invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("a refresh is already in progress")]
    RefreshInProgress,

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            ApiError::UnknownAction(_) => (StatusCode::NOT_FOUND, "UNKNOWN_ACTION"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
            ApiError::RefreshInProgress => (StatusCode::CONFLICT, "REFRESH_IN_PROGRESS"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error_code = code, "{}", self);
        } else {
            tracing::debug!(error_code = code, "{}", self);
        }

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
