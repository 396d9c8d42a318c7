//! Unified error types for the users service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::metrics;

/// Body written for every internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body written when `/first-user` finds no rows.
pub const NO_USER_MESSAGE: &str = "No user found";

/// Process-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (listener bind, serve).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while reading from a user store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver, connection or query error from MySQL.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store deliberately unavailable (in-memory store fault).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to HTTP clients.
///
/// Only two kinds are observable: a missing first user, and everything
/// else collapsed into a generic 500.
#[derive(Error, Debug)]
pub enum ApiError {
    /// `/first-user` ran against an empty table.
    #[error("no user found")]
    NotFound,

    /// Any store failure.
    #[error("internal fault: {0}")]
    Internal(#[from] StoreError),
}

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Client-facing message.
    pub error: &'static str,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never includes the underlying cause.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound => NO_USER_MESSAGE,
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound => tracing::debug!("first user requested but table is empty"),
            ApiError::Internal(e) => {
                metrics::inc_store_failures(store_error_kind(e));
                tracing::error!(error = %e, "query failed");
            }
        }

        (self.status(), Json(ErrorBody { error: self.message() })).into_response()
    }
}

fn store_error_kind(e: &StoreError) -> &'static str {
    match e {
        StoreError::Database(_) => "database",
        StoreError::Unavailable(_) => "unavailable",
    }
}

/// Generic 500 response, shared with the panic handler.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR_MESSAGE,
        }),
    )
        .into_response()
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
