use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::error::ConfigError;
use crate::navigation::Navigation;
use crate::session::Session;

/// Name of the secret holding the expected username.
pub const USERNAME_SECRET: &str = "APP_USERNAME";
/// Name of the secret holding the expected password.
pub const PASSWORD_SECRET: &str = "APP_PASSWORD";

/// SHA-256 digest of a submitted or configured credential.
fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// The configured username/password. Only digests are kept in memory.
#[derive(Clone)]
pub struct CredentialPair {
    username: [u8; 32],
    password: [u8; 32],
}

impl CredentialPair {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    /// Read both secrets through `lookup` (usually the process environment).
    /// Missing values are reported by secret name; empty strings are kept
    /// as configured values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username =
            lookup(USERNAME_SECRET).ok_or(ConfigError::MissingSecret(USERNAME_SECRET))?;
        let password =
            lookup(PASSWORD_SECRET).ok_or(ConfigError::MissingSecret(PASSWORD_SECRET))?;
        Ok(Self::new(&username, &password))
    }

    /// Exact byte-for-byte comparison of both fields. Both digests are
    /// always compared so the outcome does not depend on which field failed.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = digest(username) == self.username;
        let password_ok = digest(password) == self.password;
        username_ok & password_ok
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialPair(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Decides whether a session may see anything beyond the login view.
#[derive(Debug, Clone)]
pub struct AuthGate {
    credentials: Result<CredentialPair, ConfigError>,
}

impl AuthGate {
    pub fn new(credentials: Result<CredentialPair, ConfigError>) -> Self {
        Self { credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_ok()
    }

    pub fn state(&self, session: &Session) -> AuthState {
        if session.is_authenticated() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    /// Consume the staged login buffers and compare them with the
    /// configured pair.
    ///
    /// Both buffers are gone after this returns, whatever the outcome.
    /// With nothing staged this is a no-op that reports the current state.
    pub fn submit(&self, session: &mut Session) -> Result<AuthState, ConfigError> {
        let Some(attempt) = session.take_credentials() else {
            return Ok(self.state(session));
        };
        let credentials = self.credentials.as_ref().map_err(Clone::clone)?;

        if credentials.matches(&attempt.username, &attempt.password) {
            session.mark_logged_in();
            Ok(AuthState::LoggedIn)
        } else {
            session.mark_rejected();
            Ok(AuthState::LoggedOut)
        }
    }

    pub fn logout(&self, session: &mut Session, navigation: &mut Navigation) {
        session.mark_logged_out();
        navigation.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;

    use super::*;
    use crate::navigation::ToolKey;
    use crate::session::SessionId;

    fn gate() -> AuthGate {
        AuthGate::new(Ok(CredentialPair::new("admin", "secret123")))
    }

    fn session() -> Session {
        Session::new(SessionId::generate(), Utc::now())
    }

    #[test]
    fn correct_pair_logs_in_and_clears_buffers() {
        let gate = gate();
        let mut session = session();
        session.stage_credentials("admin".into(), "secret123".into());

        assert_eq!(gate.submit(&mut session), Ok(AuthState::LoggedIn));
        assert!(session.is_authenticated());
        assert!(!session.login_rejected());
        assert!(!session.has_staged_credentials());
    }

    #[test]
    fn wrong_password_stays_logged_out_and_clears_both_buffers() {
        let gate = gate();
        let mut session = session();
        session.stage_credentials("admin".into(), "wrong".into());

        assert_eq!(gate.submit(&mut session), Ok(AuthState::LoggedOut));
        assert!(!session.is_authenticated());
        assert!(session.login_rejected());
        assert!(!session.has_staged_credentials());
    }

    #[test]
    fn near_misses_are_rejected() {
        let gate = gate();
        for (user, pass) in [
            ("Admin", "secret123"),
            ("admin ", "secret123"),
            ("admin", "secret1234"),
            ("", ""),
            ("secret123", "admin"),
        ] {
            let mut session = session();
            session.stage_credentials(user.into(), pass.into());
            assert_eq!(
                gate.submit(&mut session),
                Ok(AuthState::LoggedOut),
                "{user:?}/{pass:?} should be rejected"
            );
        }
    }

    #[test]
    fn submit_without_staged_buffers_is_a_no_op() {
        let gate = gate();
        let mut session = session();
        session.stage_credentials("admin".into(), "secret123".into());
        gate.submit(&mut session).expect("gate is configured");

        assert_eq!(gate.submit(&mut session), Ok(AuthState::LoggedIn));
        assert_eq!(gate.submit(&mut session), Ok(AuthState::LoggedIn));
    }

    #[test]
    fn missing_secret_fails_fast_and_still_clears_buffers() {
        let gate = AuthGate::new(Err(ConfigError::MissingSecret(PASSWORD_SECRET)));
        let mut session = session();
        session.stage_credentials("admin".into(), "secret123".into());

        assert_eq!(
            gate.submit(&mut session),
            Err(ConfigError::MissingSecret(PASSWORD_SECRET))
        );
        assert!(!session.is_authenticated());
        assert!(!session.has_staged_credentials());
    }

    #[test]
    fn from_lookup_reports_first_missing_secret() {
        let empty: HashMap<&str, String> = HashMap::new();
        let err = CredentialPair::from_lookup(|k| empty.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret(USERNAME_SECRET));

        let only_user = HashMap::from([(USERNAME_SECRET, "admin".to_string())]);
        let err = CredentialPair::from_lookup(|k| only_user.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret(PASSWORD_SECRET));

        let both = HashMap::from([
            (USERNAME_SECRET, "admin".to_string()),
            (PASSWORD_SECRET, "secret123".to_string()),
        ]);
        let pair = CredentialPair::from_lookup(|k| both.get(k).cloned()).expect("both set");
        assert!(pair.matches("admin", "secret123"));
    }

    #[test]
    fn logout_from_any_state_clears_everything() {
        let gate = gate();

        let mut logged_in = session();
        logged_in.stage_credentials("admin".into(), "secret123".into());
        gate.submit(&mut logged_in).expect("gate is configured");

        let mut rejected = session();
        rejected.stage_credentials("admin".into(), "nope".into());
        gate.submit(&mut rejected).expect("gate is configured");

        for mut session in [logged_in, rejected, self::session()] {
            let mut nav = Navigation::open(ToolKey::Linkedin);
            gate.logout(&mut session, &mut nav);
            assert_eq!(gate.state(&session), AuthState::LoggedOut);
            assert!(!session.login_rejected());
            assert!(nav.is_dashboard());
        }
    }

    #[test]
    fn debug_never_prints_credentials() {
        let pair = CredentialPair::new("admin", "secret123");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("admin"));
        assert!(!rendered.contains("secret123"));
    }
}
