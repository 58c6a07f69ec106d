use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::repository::RepositoryError;
use crate::validation::{PersonField, ValidationError};

/// Failures surfaced by the HTTP layer. Every variant answers with a bare
/// status code and an empty body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    MalformedBody(String),
    #[error("invalid query string: {0}")]
    MalformedQuery(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("nickname already taken")]
    DuplicateNickname,
    #[error("person not found")]
    NotFound,
    #[error("query failed: {0}")]
    QueryFailed(RepositoryError),
    #[error("store failure: {0}")]
    Internal(RepositoryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(error) => match error {
                ValidationError::MalformedDate
                | ValidationError::MissingField(PersonField::Stack) => StatusCode::BAD_REQUEST,
                ValidationError::MissingField(_)
                | ValidationError::FieldTooLong(_)
                | ValidationError::InvalidDate
                | ValidationError::InvalidStackEntry => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::DuplicateNickname => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::QueryFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        status.into_response()
    }
}

/// Anything that stops the process before it starts serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error("failed to install the log subscriber: {0}")]
    Telemetry(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("failed to reach the store: {0}")]
    Store(#[from] RepositoryError),
    #[error("failed to bind the listener: {0}")]
    Io(#[from] std::io::Error),
}
