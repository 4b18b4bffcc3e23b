use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog;

/// Query-string key that carries the navigation state (`/?app=linkedin`).
pub const APP_PARAM: &str = "app";

/// A tool the dashboard knows how to route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolKey {
    Linkedin,
    Keywords,
}

impl ToolKey {
    pub const ALL: [ToolKey; 2] = [ToolKey::Linkedin, ToolKey::Keywords];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKey::Linkedin => "linkedin",
            ToolKey::Keywords => "keywords",
        }
    }

    /// Display label from the dashboard catalog.
    pub fn label(self) -> &'static str {
        catalog::card(self).label
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKey {
    type Err = ();

    /// Exact, case-sensitive match on the navigation value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

/// Which view the user asked for, as carried in the page address.
///
/// Unset means "show the dashboard". The raw value is kept as-is so an
/// unrecognised key can be reported back to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    app: Option<String>,
}

/// What the router should do with a [`Navigation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Dashboard,
    Tool(ToolKey),
    Unknown(&'a str),
}

impl Navigation {
    pub fn dashboard() -> Self {
        Self::default()
    }

    pub fn open(key: ToolKey) -> Self {
        Self {
            app: Some(key.as_str().to_string()),
        }
    }

    /// Build from the raw `app` query value. Only the empty value counts as
    /// unset; anything else is kept verbatim for matching.
    pub fn from_param(raw: Option<&str>) -> Self {
        let app = raw
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self { app }
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    pub fn is_dashboard(&self) -> bool {
        self.app.is_none()
    }

    pub fn clear(&mut self) {
        self.app = None;
    }

    pub fn resolve(&self) -> Route<'_> {
        match self.app.as_deref() {
            None => Route::Dashboard,
            Some(raw) => match raw.parse::<ToolKey>() {
                Ok(key) => Route::Tool(key),
                Err(()) => Route::Unknown(raw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_param_is_dashboard() {
        assert!(Navigation::from_param(None).is_dashboard());
        assert!(Navigation::from_param(Some("")).is_dashboard());
    }

    #[test]
    fn padded_values_are_not_trimmed() {
        assert_eq!(
            Navigation::from_param(Some(" linkedin")).resolve(),
            Route::Unknown(" linkedin")
        );
        assert_eq!(
            Navigation::from_param(Some("keywords\t")).resolve(),
            Route::Unknown("keywords\t")
        );
        assert_eq!(
            Navigation::from_param(Some("   ")).resolve(),
            Route::Unknown("   ")
        );
    }

    #[test]
    fn known_keys_resolve_to_tools() {
        assert_eq!(
            Navigation::from_param(Some("linkedin")).resolve(),
            Route::Tool(ToolKey::Linkedin)
        );
        assert_eq!(
            Navigation::from_param(Some("keywords")).resolve(),
            Route::Tool(ToolKey::Keywords)
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            Navigation::from_param(Some("LinkedIn")).resolve(),
            Route::Unknown("LinkedIn")
        );
    }

    #[test]
    fn unknown_key_is_preserved_for_reporting() {
        let nav = Navigation::from_param(Some("crm"));
        assert_eq!(nav.resolve(), Route::Unknown("crm"));
        assert_eq!(nav.app(), Some("crm"));
    }

    #[test]
    fn clear_returns_to_dashboard() {
        let mut nav = Navigation::open(ToolKey::Keywords);
        assert_eq!(nav.app(), Some("keywords"));
        nav.clear();
        assert_eq!(nav.resolve(), Route::Dashboard);
    }
}
