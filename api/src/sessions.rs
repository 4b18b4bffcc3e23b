use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use toolboard_core::session::{Session, SessionId};

pub const SESSION_COOKIE: &str = "toolboard_session";

/// In-memory session table shared by every request.
///
/// The lock is held only to copy a snapshot out or to apply one transition;
/// rendering always works on a snapshot.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Resume the presented session if it is still live, otherwise open a
    /// new one. Returns the id in use and whether it was just created.
    pub async fn resume_or_create(
        &self,
        presented: Option<SessionId>,
        now: DateTime<Utc>,
    ) -> (SessionId, bool) {
        let mut sessions = self.inner.write().await;

        if let Some(id) = presented {
            let live = sessions
                .get(&id)
                .map(|session| !session.is_expired(now, self.idle_ttl));
            match live {
                Some(true) => {
                    if let Some(session) = sessions.get_mut(&id) {
                        session.touch(now);
                    }
                    return (id, false);
                }
                Some(false) => {
                    sessions.remove(&id);
                    tracing::debug!(session = ?id, "session expired");
                }
                None => {}
            }
        }

        let id = SessionId::generate();
        sessions.insert(id.clone(), Session::new(id.clone(), now));
        tracing::debug!(session = ?id, "session created");
        (id, true)
    }

    pub async fn snapshot(&self, id: &SessionId) -> Option<Session> {
        self.inner.read().await.get(id).cloned()
    }

    /// Apply one transition to a session. A session swept between the
    /// middleware and the handler is recreated logged out.
    pub async fn update<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone(), Utc::now()));
        f(session)
    }

    /// Re-issue a session under a new id and forget the old one. Used when
    /// the session gains privileges so a previously known id stops working.
    pub async fn rotate(&self, id: &SessionId, now: DateTime<Utc>) -> SessionId {
        let mut sessions = self.inner.write().await;
        let fresh = SessionId::generate();
        let mut session = sessions
            .remove(id)
            .unwrap_or_else(|| Session::new(fresh.clone(), now));
        session.rekey(fresh.clone());
        session.touch(now);
        sessions.insert(fresh.clone(), session);
        tracing::debug!(from = ?id, to = ?fresh, "session rotated");
        fresh
    }

    /// Drop every session idle for longer than the TTL.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.idle_ttl));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub fn spawn_sweeper(self, period: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = self.sweep(Utc::now()).await;
                if removed > 0 {
                    let remaining = self.len().await;
                    tracing::info!(removed, remaining, "expired sessions swept");
                }
            }
        })
    }
}

pub fn session_cookie(id: &SessionId, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax{secure}",
        id.as_str()
    )
}

pub fn extract_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for raw in headers.get_all(COOKIE) {
        let Ok(raw) = raw.to_str() else {
            continue;
        };
        for part in raw.split(';') {
            let mut pieces = part.trim().splitn(2, '=');
            let (Some(key), Some(value)) = (pieces.next(), pieces.next()) else {
                continue;
            };
            if key.trim() == cookie_name && !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}
