//! The per-request render pipeline: auth gate first, then the view router.
//!
//! `Pipeline::render` is a pure function of the session snapshot and the
//! navigation state. It never mutates either, so rendering the same inputs
//! twice yields the same [`Page`].

use crate::auth::{AuthGate, AuthState};
use crate::catalog::{self, ToolCard};
use crate::error::RenderError;
use crate::navigation::{Navigation, Route, ToolKey};
use crate::registry::{Frame, Notice, Registry};
use crate::session::Session;

/// Body of the tool view: the renderer's output, or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolBody {
    Rendered(Frame),
    Failed(RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login {
        rejected: bool,
    },
    Dashboard {
        cards: &'static [ToolCard],
        notices: Vec<Notice>,
    },
    Tool {
        card: &'static ToolCard,
        body: ToolBody,
    },
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub view: View,
    /// Navigation state after the pass. Differs from the request when the
    /// router dropped an unknown key.
    pub navigation: Navigation,
}

impl Page {
    fn dashboard(notices: Vec<Notice>) -> Self {
        Self {
            view: View::Dashboard {
                cards: &catalog::CATALOG,
                notices,
            },
            navigation: Navigation::dashboard(),
        }
    }
}

pub struct Pipeline<'a> {
    gate: &'a AuthGate,
    registry: &'a Registry,
}

impl<'a> Pipeline<'a> {
    pub fn new(gate: &'a AuthGate, registry: &'a Registry) -> Self {
        Self { gate, registry }
    }

    pub fn render(&self, session: &Session, navigation: &Navigation) -> Page {
        if self.gate.state(session) == AuthState::LoggedOut {
            return Page {
                view: View::Login {
                    rejected: session.login_rejected(),
                },
                navigation: navigation.clone(),
            };
        }

        self.route(navigation)
    }

    fn route(&self, navigation: &Navigation) -> Page {
        match navigation.resolve() {
            Route::Dashboard => Page::dashboard(Vec::new()),
            Route::Tool(key) => Page {
                view: self.render_tool(key),
                navigation: navigation.clone(),
            },
            Route::Unknown(app) => Page::dashboard(vec![
                Notice::error(format!("Unknown app: {app}")),
                Notice::info("Returning to dashboard..."),
            ]),
        }
    }

    fn render_tool(&self, key: ToolKey) -> View {
        let body = match self.registry.render(key) {
            Ok(frame) => ToolBody::Rendered(frame),
            Err(err) => ToolBody::Failed(err),
        };
        View::Tool {
            card: catalog::card(key),
            body,
        }
    }
}
