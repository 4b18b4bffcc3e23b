use serde::Serialize;
use utoipa::ToSchema;

use crate::navigation::ToolKey;

/// Structured error body returned by the JSON endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error code (e.g. "validation_failed", "rate_limited")
    pub error: String,
    /// Human-readable description of what went wrong
    pub message: String,
    /// Which field caused the error (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Request ID for tracing and debugging
    pub request_id: String,
    /// Hint about what the correct usage looks like
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_hint: Option<String>,
}

/// Error codes used across the API
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const RATE_LIMITED: &str = "rate_limited";
}

/// The deployment is missing something the gate needs. Fatal for the
/// render pass that hits it and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("authentication secret `{0}` is not configured")]
    MissingSecret(&'static str),
}

/// A tool view could not be produced. The router shows this in place of
/// the tool and stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("{} module not found. Please ensure it is registered with the dashboard.", .0.label())]
    Unavailable(ToolKey),
    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message_names_the_tool() {
        let err = RenderError::Unavailable(ToolKey::Linkedin);
        assert!(err.to_string().starts_with("LinkedIn Analysis module not found"));
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let err = ConfigError::MissingSecret("APP_PASSWORD");
        assert_eq!(
            err.to_string(),
            "authentication secret `APP_PASSWORD` is not configured"
        );
    }

    #[test]
    fn api_error_skips_empty_optionals() {
        let body = serde_json::to_value(ApiError {
            error: codes::RATE_LIMITED.to_string(),
            message: "slow down".to_string(),
            field: None,
            request_id: "req".to_string(),
            docs_hint: None,
        })
        .expect("ApiError should serialize");
        assert!(body.get("field").is_none());
        assert!(body.get("docs_hint").is_none());
        assert_eq!(body["error"], "rate_limited");
    }
}
