use std::sync::Arc;

use chrono::Duration;
use toolboard_core::auth::{AuthGate, CredentialPair};
use toolboard_core::navigation::ToolKey;
use toolboard_core::registry::Registry;

use crate::sessions::SessionStore;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// Process settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub require_https: bool,
    pub session_ttl: Duration,
    /// Tools whose renderer is deliberately left unregistered.
    pub disabled_tools: Vec<ToolKey>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            require_https: false,
            session_ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
            disabled_tools: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let require_https = lookup("TOOLBOARD_REQUIRE_HTTPS")
            .map(|v| v == "true")
            .unwrap_or(defaults.require_https);

        let session_ttl = lookup("TOOLBOARD_SESSION_TTL_MINUTES")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .map(Duration::minutes)
            .unwrap_or(defaults.session_ttl);

        let disabled_tools = lookup("TOOLBOARD_DISABLED_TOOLS")
            .map(|raw| parse_tool_list(&raw))
            .unwrap_or_default();

        Self {
            port,
            require_https,
            session_ttl,
            disabled_tools,
        }
    }
}

fn parse_tool_list(raw: &str) -> Vec<ToolKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<ToolKey>() {
            Ok(key) => Some(key),
            Err(()) => {
                tracing::warn!(value = s, "ignoring unknown tool in TOOLBOARD_DISABLED_TOOLS");
                None
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
    pub registry: Arc<Registry>,
    pub sessions: SessionStore,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        credentials: Result<CredentialPair, toolboard_core::error::ConfigError>,
        registry: Registry,
        settings: Settings,
    ) -> Self {
        Self {
            gate: Arc::new(AuthGate::new(credentials)),
            registry: Arc::new(registry),
            sessions: SessionStore::new(settings.session_ttl),
            settings: Arc::new(settings),
        }
    }
}
