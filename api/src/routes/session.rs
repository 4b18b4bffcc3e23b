use axum::extract::State;
use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use toolboard_core::auth::AuthState;

use crate::extract::SessionHandle;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/session", get(session_status))
}

/// What the caller's session currently looks like. Never includes
/// credentials or the session id.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionStatusResponse {
    pub state: AuthState,
    pub login_rejected: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/v1/session",
    responses(
        (status = 200, description = "Snapshot of the caller's session", body = SessionStatusResponse)
    ),
    tag = "session"
)]
pub async fn session_status(
    State(state): State<AppState>,
    session: SessionHandle,
) -> Json<SessionStatusResponse> {
    let snapshot = session.snapshot().await;

    Json(SessionStatusResponse {
        state: state.gate.state(&snapshot),
        login_rejected: snapshot.login_rejected(),
        created_at: snapshot.created_at(),
        last_seen_at: snapshot.last_seen_at(),
    })
}
