use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const HSTS: &str = "max-age=63072000; includeSubDomains";

/// Redirect plain-HTTP requests (as reported by the TLS-terminating proxy in
/// `X-Forwarded-Proto`) to HTTPS, and add HSTS to every response.
///
/// Only installed when `TOOLBOARD_REQUIRE_HTTPS=true`. The session cookie is
/// marked `Secure` in the same mode.
pub async fn require_https(req: Request, next: Next) -> Response {
    if let Some(location) = https_location(req.headers(), req.uri()) {
        let mut response =
            (StatusCode::MOVED_PERMANENTLY, [("location", location)]).into_response();
        add_hsts_header(&mut response);
        return response;
    }

    let mut response = next.run(req).await;
    add_hsts_header(&mut response);
    response
}

/// HTTPS equivalent of the request when the proxy says it arrived over HTTP.
fn https_location(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("https");
    if proto != "http" {
        return None;
    }

    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let target = format!("https://{host}{path_and_query}");
    target.parse::<Uri>().ok().map(|uri| uri.to_string())
}

fn add_hsts_header(response: &mut Response) {
    response
        .headers_mut()
        .insert("strict-transport-security", HeaderValue::from_static(HSTS));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(proto: Option<&'static str>, host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static(host));
        if let Some(proto) = proto {
            headers.insert("x-forwarded-proto", HeaderValue::from_static(proto));
        }
        headers
    }

    #[test]
    fn plain_http_keeps_navigation_in_redirect() {
        let uri: Uri = "/?app=linkedin".parse().expect("uri");
        assert_eq!(
            https_location(&headers(Some("http"), "tools.example.com"), &uri),
            Some("https://tools.example.com/?app=linkedin".to_string())
        );
    }

    #[test]
    fn https_or_unknown_proto_passes_through() {
        let uri: Uri = "/".parse().expect("uri");
        assert_eq!(https_location(&headers(Some("https"), "a.example"), &uri), None);
        assert_eq!(https_location(&headers(None, "a.example"), &uri), None);
    }
}
