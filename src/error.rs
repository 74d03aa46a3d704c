use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

use crate::types::{now_timestamp, ErrorResponse, ResponseMode};

/// Errors raised by an analysis provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Exchange or symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported interval: {0}")]
    UnsupportedInterval(String),

    #[error("Analysis provider timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedInterval(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed analyze request, rendered with the symbol it was for.
#[derive(Debug)]
pub struct AnalyzeFailure {
    pub symbol: String,
    pub error: AppError,
}

impl AnalyzeFailure {
    pub fn new(symbol: impl Into<String>, error: impl Into<AppError>) -> Self {
        Self {
            symbol: symbol.into(),
            error: error.into(),
        }
    }
}

impl IntoResponse for AnalyzeFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = Json(ErrorResponse {
            timestamp: now_timestamp(),
            symbol: self.symbol,
            error: self.error.to_string(),
            mode: ResponseMode::Error,
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
