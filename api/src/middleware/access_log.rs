use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service, ServiceExt};

use crate::html;

/// Tower Layer for access pattern logging.
///
/// Emits one structured `tracing` event per request with method, path,
/// requested tool, status and latency. Query strings are never logged
/// verbatim; only the navigation key is extracted.
#[derive(Clone, Default)]
pub struct AccessLogLayer;

impl AccessLogLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService { inner }
    }
}

#[derive(Clone)]
pub struct AccessLogService<S> {
    inner: S,
}

impl<S> Service<Request> for AccessLogService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let not_ready = self.inner.clone();
        let ready = std::mem::replace(&mut self.inner, not_ready);

        Box::pin(async move {
            let start = Instant::now();
            let method = req.method().to_string();
            let path = req.uri().path().to_owned();
            let app = navigation_key(req.uri().query());

            let response = ready.oneshot(req).await.into_response();

            let status = response.status().as_u16();
            let latency_ms = start.elapsed().as_millis().min(u64::MAX as u128) as u64;

            tracing::info!(
                method = %method,
                path = %path,
                app = app.as_deref().unwrap_or("-"),
                status,
                latency_ms,
                "request handled"
            );

            Ok(response)
        })
    }
}

/// Pull the navigation key out of a raw query string.
fn navigation_key(query: Option<&str>) -> Option<String> {
    html::app_param(query).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;

    use super::*;

    #[test]
    fn navigation_key_from_query() {
        assert_eq!(navigation_key(Some("app=linkedin")), Some("linkedin".into()));
        assert_eq!(
            navigation_key(Some("x=1&app=key%20words")),
            Some("key words".into())
        );
    }

    #[test]
    fn navigation_key_absent_or_blank() {
        assert_eq!(navigation_key(None), None);
        assert_eq!(navigation_key(Some("")), None);
        assert_eq!(navigation_key(Some("app=")), None);
        assert_eq!(navigation_key(Some("other=linkedin")), None);
    }

    #[tokio::test]
    async fn layer_passes_responses_through() {
        let app = Router::new()
            .route("/", get(|| async { StatusCode::ACCEPTED }))
            .layer(AccessLogLayer::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?app=keywords")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
