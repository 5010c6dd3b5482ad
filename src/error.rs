use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. Each variant carries its own HTTP
/// mapping; bodies are always `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    EmailTaken,
    #[error("User not found")]
    UnknownUser,
    #[error("Invalid credentials")]
    BadCredentials,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    BadToken,
    #[error("Task not found")]
    TaskNotFound,
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::EmailTaken | Self::UnknownUser => StatusCode::BAD_REQUEST,
            // Missing token and bad login credentials are 401, while a
            // present-but-invalid token is 403. Inconsistent, but it is the
            // contract the client is built against.
            Self::BadCredentials | Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::BadToken => StatusCode::FORBIDDEN,
            Self::TaskNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }
        (status, Json(json!({ "message": message }))).into_response()
    }
}
