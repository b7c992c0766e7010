use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::storage::StoreError;

/// Failures of the bundled services, rendered as `{ "error": ... }`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Метод не поддерживается")]
    MethodNotAllowed,

    #[error("storage: {0}")]
    Store(#[from] StoreError),

    #[error("worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServiceError {
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(StoreError::UsernameTaken) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the caller; internal details stay in the log.
    fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::UsernameTaken) => "Логин уже занят".to_string(),
            Self::Store(_) | Self::Task(_) => "Внутренняя ошибка сервера".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {self}");
        }
        let body = serde_json::json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_is_a_conflict() {
        let err = ServiceError::from(StoreError::UsernameTaken);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.public_message(), "Логин уже занят");
    }

    #[test]
    fn storage_details_are_hidden() {
        let err = ServiceError::from(StoreError::NoDataDir);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Внутренняя ошибка сервера");
    }
}
