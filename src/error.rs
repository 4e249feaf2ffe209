use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dto::{health::HealthFailure, validation::first_error_message};

/// Errors that can occur in service layer operations.
///
/// Gateway failures never show up here: the services absorb them into degraded results.
/// Routes turn these into [`AppError::HealthUnavailable`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An environment variable exists but cannot be read as UTF-8.
    #[error("environment variable `{var}` is not valid unicode")]
    Environment {
        /// Name of the offending variable.
        var: &'static str,
    },
    /// Process statistics could not be collected.
    #[error("process metrics unavailable: {0}")]
    ProcessMetrics(String),
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(first_error_message(&err))
    }
}

/// Chat request bodies that cannot be read at all.
///
/// These are not client errors: the chat route answers them with a fallback reply.
#[derive(Debug, Error)]
pub enum ChatBodyError {
    /// The body is not JSON.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    /// The body is the JSON literal `null`.
    #[error("request body is null")]
    Null,
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input; the message is surfaced verbatim.
    #[error("{0}")]
    BadRequest(String),
    /// The health report could not be assembled; answered with the health fallback document.
    #[error("{0}")]
    HealthUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::HealthUnavailable(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            AppError::HealthUnavailable(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthFailure::new(message)),
            )
                .into_response(),
        }
    }
}
