use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Upstream search error: {0}")]
    UpstreamSearch(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message shown to the caller. Only validation failures carry detail.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            _ => "Lookup error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Upstream payloads stay in the server log; the caller only ever sees the generic body
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Validation(msg) => json!({
                "success": false,
                "error": msg,
            }),
            other => {
                tracing::error!("Lookup error: {}", other);
                json!({
                    "success": false,
                    "found": false,
                    "error": other.public_message(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;
