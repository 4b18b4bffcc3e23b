use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use toolboard_core::session::SessionId;

use crate::extract::SessionHandle;
use crate::sessions::{SESSION_COOKIE, extract_cookie_value, session_cookie};
use crate::state::AppState;

/// Resolve the caller's session from the cookie, opening a new one on first
/// contact, and hand it to handlers through request extensions.
pub async fn attach(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let presented =
        extract_cookie_value(req.headers(), SESSION_COOKIE).and_then(|raw| SessionId::parse(&raw));
    let (id, created) = state.sessions.resume_or_create(presented, Utc::now()).await;

    req.extensions_mut().insert(SessionHandle {
        id: id.clone(),
        store: state.sessions.clone(),
    });

    let mut response = next.run(req).await;

    // A handler that re-issued the session already set its own cookie.
    if created && !response.headers().contains_key(SET_COOKIE) {
        let cookie = session_cookie(&id, state.settings.require_https);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => tracing::error!(error = %err, "failed to encode session cookie"),
        }
    }

    response
}
