//! Global application error types and handlers.
//!
//! This module defines the error type returned by every handler and the
//! startup path, and renders each variant as a JSON `{"message": ...}` body
//! with a matching status code.

use adapters::AdapterError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("forbidden access")]
    Forbidden,

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("store error: {0}")]
    Store(AdapterError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AdapterError> for AppError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::InvalidId(id) => AppError::InvalidId(id),
            AdapterError::Serialization(e) => AppError::MalformedPayload(e.to_string()),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(err) => err.status(),
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidId(_) | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Config(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let message = match &self {
            AppError::Auth(err) if err.status() == StatusCode::UNAUTHORIZED => "unauthorized".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
