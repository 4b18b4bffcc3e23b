use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use toolboard_core::error::{self, ApiError, ConfigError};

use crate::html;

/// Internal error type that converts to HTML or structured JSON responses
#[derive(Debug)]
pub enum AppError {
    /// Authentication secrets are missing (500, rendered as a page)
    Configuration(ConfigError),
    /// Validation error (400)
    Validation {
        message: String,
        field: Option<String>,
    },
    /// Internal error (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::now_v7().to_string();

        let (status, api_error) = match self {
            AppError::Configuration(err) => {
                tracing::error!(error = %err, request_id = %request_id, "authentication is not configured");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(html::config_error_page(&err)),
                )
                    .into_response();
            }
            AppError::Validation { message, field } => (
                StatusCode::BAD_REQUEST,
                ApiError {
                    error: error::codes::VALIDATION_FAILED.to_string(),
                    message,
                    field,
                    request_id,
                    docs_hint: None,
                },
            ),
            AppError::Internal(msg) => {
                tracing::error!(request_id = %request_id, "Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError {
                        error: error::codes::INTERNAL_ERROR.to_string(),
                        message: "An internal error occurred".to_string(),
                        field: None,
                        request_id,
                        docs_hint: None,
                    },
                )
            }
        };

        (status, Json(api_error)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err)
    }
}
