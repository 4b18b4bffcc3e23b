use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Number of random bytes behind a session id (hex encoded on the wire).
const SESSION_ID_BYTES: usize = 32;

/// Opaque per-connection identifier carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let bytes: Vec<u8> = (0..SESSION_ID_BYTES)
            .map(|_| rand::thread_rng().r#gen::<u8>())
            .collect();
        Self(hex::encode(bytes))
    }

    /// Accept only values this process could have issued.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let well_formed = raw.len() == SESSION_ID_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Session ids are bearer secrets; keep them out of logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}…)", &self.0[..8.min(self.0.len())])
    }
}

/// Username/password as typed into the login form. Lives only between
/// staging and the next `AuthGate::submit`.
#[derive(Clone)]
pub struct LoginBuffer {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginBuffer")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server-side state for one user connection.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    authenticated: bool,
    login_rejected: bool,
    buffer: Option<LoginBuffer>,
    created_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            authenticated: false,
            login_rejected: false,
            buffer: None,
            created_at: now,
            last_seen_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// True when the last login attempt on this session was rejected.
    pub fn login_rejected(&self) -> bool {
        self.login_rejected
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
    }

    /// Put submitted form values into the entry buffers. A previously
    /// staged pair is replaced.
    pub fn stage_credentials(&mut self, username: String, password: String) {
        self.buffer = Some(LoginBuffer { username, password });
    }

    pub fn has_staged_credentials(&self) -> bool {
        self.buffer.is_some()
    }

    pub(crate) fn take_credentials(&mut self) -> Option<LoginBuffer> {
        self.buffer.take()
    }

    pub(crate) fn mark_logged_in(&mut self) {
        self.authenticated = true;
        self.login_rejected = false;
    }

    pub(crate) fn mark_rejected(&mut self) {
        self.authenticated = false;
        self.login_rejected = true;
    }

    pub(crate) fn mark_logged_out(&mut self) {
        self.authenticated = false;
        self.login_rejected = false;
        self.buffer = None;
    }

    /// Move the session under a fresh id, keeping its state.
    pub fn rekey(&mut self, id: SessionId) {
        self.id = id;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_seen_at {
            self.last_seen_at = now;
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, idle_ttl: Duration) -> bool {
        now - self.last_seen_at > idle_ttl
    }
}
