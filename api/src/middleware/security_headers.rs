use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::{
    CACHE_CONTROL, CONTENT_SECURITY_POLICY, HeaderName, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
};
use axum::middleware::Next;
use axum::response::Response;

/// Headers set on every response, swagger and JSON endpoints included.
///
/// The CSP only sets `frame-ancestors`; the dashboard pages rely on inline
/// styles and the swagger UI on its own scripts.
const BASELINE: [(HeaderName, &str); 4] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (X_FRAME_OPTIONS, "DENY"),
    (CONTENT_SECURITY_POLICY, "frame-ancestors 'none'"),
];

pub async fn apply(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in BASELINE {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

/// Pages carry session-dependent content and must never be served from a
/// shared cache.
pub async fn no_store(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    use super::*;

    async fn send(app: Router, uri: &str) -> Response {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed")
    }

    #[tokio::test]
    async fn baseline_is_applied_to_errors_too() {
        let app = Router::new()
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }))
            .layer(middleware::from_fn(apply));

        for uri in ["/broken", "/missing"] {
            let response = send(app.clone(), uri).await;
            for (name, value) in &BASELINE {
                assert_eq!(
                    response.headers().get(name).map(|v| v.to_str().ok()),
                    Some(Some(*value)),
                    "{name} on {uri}"
                );
            }
            assert!(response.headers().get(CACHE_CONTROL).is_none());
        }
    }

    #[tokio::test]
    async fn handler_cache_control_is_overridden_on_pages() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { ([(CACHE_CONTROL, "public, max-age=600")], "page") }),
            )
            .layer(middleware::from_fn(no_store));

        let response = send(app, "/").await;
        let values: Vec<&str> = response
            .headers()
            .get_all(CACHE_CONTROL)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(values, vec!["no-store"]);
    }
}
