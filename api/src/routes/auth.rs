use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use toolboard_core::auth::AuthState;
use toolboard_core::navigation::Navigation;

use crate::error::AppError;
use crate::extract::{AppForm, SessionHandle};
use crate::html::navigation_href;
use crate::sessions::session_cookie;
use crate::state::AppState;

pub fn login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn logout_router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

// ──────────────────────────────────────────────
// POST /login
// ──────────────────────────────────────────────

/// Submitted login form. Deliberately not `Debug`.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub app: Option<String>,
}

/// Stage the submitted pair on the session and run it through the gate.
///
/// Accepted and rejected attempts both redirect back to the requested view;
/// the next render shows either that view or the inline error. An accepted
/// attempt also moves the session to a new id. Missing secrets stop here
/// with the configuration page.
pub async fn login(
    State(state): State<AppState>,
    session: SessionHandle,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, AppError> {
    let LoginForm {
        username,
        password,
        app,
    } = form;
    let navigation = Navigation::from_param(app.as_deref());

    let gate = state.gate.clone();
    let outcome = session
        .update(move |s| {
            s.stage_credentials(username, password);
            gate.submit(s)
        })
        .await?;

    let redirect = Redirect::to(&navigation_href(&navigation));
    match outcome {
        AuthState::LoggedIn => {
            tracing::info!(decision = "allow", "login attempt");
            let id = session.rotate().await;
            let cookie = session_cookie(&id, state.settings.require_https);
            Ok(([(SET_COOKIE, cookie)], redirect).into_response())
        }
        AuthState::LoggedOut => {
            tracing::warn!(decision = "deny", "login attempt");
            Ok(redirect.into_response())
        }
    }
}

// ──────────────────────────────────────────────
// POST /logout
// ──────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub app: Option<String>,
}

pub async fn logout(
    State(state): State<AppState>,
    session: SessionHandle,
    AppForm(form): AppForm<LogoutForm>,
) -> Redirect {
    let mut navigation = Navigation::from_param(form.app.as_deref());

    let gate = state.gate.clone();
    let navigation = session
        .update(move |s| {
            gate.logout(s, &mut navigation);
            navigation
        })
        .await;

    tracing::info!("logout");
    Redirect::to(&navigation_href(&navigation))
}
