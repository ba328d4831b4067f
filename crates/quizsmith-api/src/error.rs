//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; anything that converts into `AppError`
//! renders as a status code plus a `{"error": "..."}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quizsmith_core::{AppError, ErrorMetadata, LogLevel};
use quizsmith_processing::ValidationError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from quizsmith-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(validation_to_app_error(err))
    }
}

pub(crate) fn validation_to_app_error(err: ValidationError) -> AppError {
    match err {
        ValidationError::FileTooLarge { max, .. } => AppError::TooLarge { limit_bytes: max },
        ValidationError::InvalidExtension { extension, .. } => AppError::BadExtension(extension),
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, error_type, error_code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, error_type, error_code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, error_type, error_code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}
