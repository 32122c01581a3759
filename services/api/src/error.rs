//! Central error type for the API service
//!
//! Every handler failure maps to a structured JSON body with a stable
//! machine-readable code and a human-readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ledger::LedgerError;
use serde_json::json;
use shortener::ShortenerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "FORBIDDEN"),
            AppError::RateLimitExceeded(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, msg, "RATE_LIMIT_EXCEEDED")
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            AppError::InternalError(err) => {
                tracing::error!(%err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound { .. } | LedgerError::RequestNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            LedgerError::InvalidTransition { .. }
            | LedgerError::UnknownAction { .. }
            | LedgerError::InvalidAmount
            | LedgerError::BelowMinimum { .. }
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::Validation { .. } => AppError::BadRequest(err.to_string()),
            LedgerError::Overflow | LedgerError::Storage { .. } => {
                AppError::InternalError(anyhow::Error::new(err))
            }
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::LinkNotFound { .. } => AppError::NotFound(err.to_string()),
            ShortenerError::AliasTaken { .. } => AppError::Conflict(err.to_string()),
            ShortenerError::InvalidUrl { .. } => AppError::BadRequest(err.to_string()),
            ShortenerError::CodeSpaceExhausted => {
                AppError::InternalError(anyhow::Error::new(err))
            }
        }
    }
}
