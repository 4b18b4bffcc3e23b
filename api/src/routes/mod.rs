use axum::{Router, middleware as axum_middleware};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::middleware;
use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod pages;
pub mod session;

/// Build the full application router.
///
/// `rate_limit` installs the per-IP login limiter, which needs the peer
/// address from `into_make_service_with_connect_info`.
pub fn app(state: AppState, rate_limit: bool) -> Router {
    let login = if rate_limit {
        auth::login_router().layer(middleware::rate_limit::login_layer())
    } else {
        auth::login_router()
    };

    let pages = Router::new()
        .merge(pages::router())
        .merge(login)
        .merge(auth::logout_router())
        .layer(axum_middleware::from_fn(
            middleware::security_headers::no_store,
        ));

    let session_routes = Router::new()
        .merge(pages)
        .merge(session::router())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::attach,
        ));

    let require_https = state.settings.require_https;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health::router())
        .merge(session_routes)
        .layer(middleware::access_log::AccessLogLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .option_layer(require_https.then(|| {
                    axum_middleware::from_fn(middleware::https::require_https)
                }))
                .layer(axum_middleware::from_fn(
                    middleware::security_headers::apply,
                )),
        )
        .with_state(state)
}
