//! Custom extractors for page handlers.
//!
//! `SessionHandle` reads the session resolved by `middleware::session::attach`.
//! `AppForm<T>` replaces `axum::Form<T>` so malformed submissions become a
//! structured `AppError` instead of axum's plain-text rejection.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use chrono::Utc;
use toolboard_core::session::{Session, SessionId};

use crate::error::AppError;
use crate::sessions::SessionStore;

/// The caller's session, injected into request extensions by the session
/// middleware.
#[derive(Clone)]
pub struct SessionHandle {
    pub id: SessionId,
    pub store: SessionStore,
}

impl SessionHandle {
    pub async fn snapshot(&self) -> Session {
        match self.store.snapshot(&self.id).await {
            Some(session) => session,
            None => self.store.update(&self.id, |s| s.clone()).await,
        }
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        self.store.update(&self.id, f).await
    }

    /// Swap the session onto a new id; the caller must send the new cookie.
    pub async fn rotate(&self) -> SessionId {
        self.store.rotate(&self.id, Utc::now()).await
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session middleware is not installed".to_string()))
    }
}

/// Form extractor that converts deserialization errors to `AppError::Validation`.
pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(AppForm(value)),
            Err(rejection) => Err(map_form_rejection(rejection)),
        }
    }
}

pub fn map_form_rejection(rejection: FormRejection) -> AppError {
    let body_text = rejection.body_text();
    let field = extract_field_from_serde_message(&body_text).unwrap_or("form".to_string());
    AppError::Validation {
        message: format!("Invalid form submission: {body_text}"),
        field: Some(field),
    }
}

/// Try to extract a field name from serde's "missing field `x`" message.
fn extract_field_from_serde_message(msg: &str) -> Option<String> {
    let start = msg.find("missing field `")?;
    let after = &msg[start + 15..];
    let end = after.find('`')?;
    Some(after[..end].to_string())
}
