use std::net::SocketAddr;
use std::time::Duration;

use toolboard_core::auth::CredentialPair;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

mod error;
mod extract;
mod html;
mod middleware;
mod routes;
mod sessions;
mod state;
mod tools;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolboard API",
        version = "0.1.0",
        description = "JSON endpoints of the SEO & marketing tools dashboard."
    ),
    paths(
        routes::health::health_check,
        routes::session::session_status,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::health::ToolStatus,
        routes::session::SessionStatusResponse,
        toolboard_core::auth::AuthState,
        toolboard_core::navigation::ToolKey,
        toolboard_core::error::ApiError,
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    // Structured JSON logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let settings = state::Settings::from_env();

    // Missing secrets only fail logins; the service still starts
    let credentials = CredentialPair::from_lookup(|key| std::env::var(key).ok());
    if let Err(err) = &credentials {
        tracing::warn!(error = %err, "logins will fail until the secret is configured");
    }

    let registry = tools::registry(&settings.disabled_tools);
    let port = settings.port;

    let app_state = state::AppState::new(credentials, registry, settings);
    app_state
        .sessions
        .clone()
        .spawn_sweeper(SESSION_SWEEP_INTERVAL);

    let app = routes::app(app_state, true);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Toolboard listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "failed to bind listener");
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!(error = %err, "server terminated");
        std::process::exit(1);
    }
}
