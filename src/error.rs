use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Posts API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse posts API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found")]
    NotFound,

    #[error("Invalid post id: {0:?}")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::InvalidId(id) => (StatusCode::BAD_REQUEST, format!("Invalid post id: {:?}", id)),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Template(e) => {
                error!("template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render page".to_string(),
                )
            }
            e @ (AppError::Request(_) | AppError::Api { .. } | AppError::Decode(_)) => {
                error!("posts api error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Posts API request failed".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
