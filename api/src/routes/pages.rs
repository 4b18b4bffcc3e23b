use axum::extract::{RawQuery, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use toolboard_core::navigation::Navigation;
use toolboard_core::view::{Pipeline, ToolBody, View};

use crate::extract::SessionHandle;
use crate::html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

// ──────────────────────────────────────────────
// GET /
// ──────────────────────────────────────────────

/// One render pass: auth gate, then the view router, on a snapshot of the
/// caller's session.
///
/// The query is read raw so that no query string can be rejected before the
/// gate runs.
pub async fn index(
    State(state): State<AppState>,
    session: SessionHandle,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let app = html::app_param(query.as_deref());
    let requested = Navigation::from_param(app.as_deref());
    let snapshot = session.snapshot().await;

    let page = Pipeline::new(&state.gate, &state.registry).render(&snapshot, &requested);

    match &page.view {
        View::Dashboard { notices, .. } if !notices.is_empty() => {
            tracing::warn!(app = requested.app().unwrap_or("-"), "unknown app requested");
        }
        View::Tool {
            card,
            body: ToolBody::Failed(err),
        } => {
            tracing::warn!(tool = card.key.as_str(), error = %err, "tool could not be rendered");
        }
        _ => {}
    }

    Html(html::render_page(&page, &requested))
}
