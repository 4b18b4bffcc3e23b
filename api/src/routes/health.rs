use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use toolboard_core::navigation::ToolKey;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ToolStatus {
    pub key: ToolKey,
    pub available: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub credentials_configured: bool,
    pub tools: Vec<ToolStatus>,
}

/// Reports whether users can log in and which tools have a renderer.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or running without some tools", body = HealthResponse),
        (status = 503, description = "Authentication secrets are missing", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let credentials_configured = state.gate.is_configured();
    let tools: Vec<ToolStatus> = ToolKey::ALL
        .into_iter()
        .map(|key| ToolStatus {
            key,
            available: state.registry.contains(key),
        })
        .collect();

    let all_tools = tools.iter().all(|t| t.available);
    let status = if credentials_configured && all_tools {
        "ok"
    } else {
        "degraded"
    };
    let http_status = if credentials_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            credentials_configured,
            tools,
        }),
    )
}
