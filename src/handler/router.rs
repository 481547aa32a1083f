//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, dispatch, and the access log line.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, Version};

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::page;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    let response = match check_http_method(method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path,
                if_none_match: header_string(&req, "if-none-match"),
            };
            route_request(&ctx, &state).await
        }
    };

    let response = if is_head {
        http::strip_body(response)
    } else {
        response
    };
    let response = http::with_server_header(response, &state.config.http.server_name);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // 0. Health check endpoints (highest priority, always fast)
    let health = &state.config.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        // Store absence is a supported degraded mode, so readiness does not probe it
        return http::build_health_response("ok");
    }

    // 1. JSON API
    if ctx.path == "/api" || ctx.path.starts_with(api::API_PREFIX) {
        let mut response = api::handle_api(ctx.path, state).await;
        if state.config.http.enable_cors {
            let headers = response.headers_mut();
            headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
            headers.insert(
                "Access-Control-Expose-Headers",
                HeaderValue::from_static(api::REQUEST_ID_HEADER),
            );
        }
        return response;
    }

    // 2. Public assets
    if static_files::is_public_path(ctx.path) {
        return static_files::serve_public(ctx, &state.config.site.public_dir).await;
    }

    // 3. Localized pages
    page::handle_page(ctx.path, state).await
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{testing, Store};
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn send(state: &Arc<AppState>, req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
        handle_request(req, peer(), Arc::clone(state)).await.unwrap()
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_routes() {
        let state = Arc::new(AppState::for_tests(testing::seeded_store().await));

        let resp = send(&state, get("/api/colors")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await.is_array());

        let resp = send(&state, get("/api/events")).await;
        assert!(body_json(resp).await["events"].is_array());

        let resp = send(&state, get("/api/slider")).await;
        assert!(body_json(resp).await["slides"].is_array());

        let resp = send(&state, get("/api/doctors")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_colors_without_store_is_500() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        let resp = send(&state, get("/api/colors")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().contains_key(api::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_patients_redirect_through_router() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        let resp = send(&state, get("/fr/patients")).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["Location"], "/fr/insurance");
    }

    #[tokio::test]
    async fn test_health_probes() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        for path in ["/healthz", "/readyz"] {
            let resp = send(&state, get(path)).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_json(resp).await["status"], "ok");
        }
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/slider")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = send(&state, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_head_has_headers_without_body() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/api/events")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = send(&state, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_ne!(resp.headers()["Content-Length"], "0");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_server_header_on_every_response() {
        let state = Arc::new(AppState::for_tests(Store::disconnected()));
        let resp = send(&state, get("/en")).await;
        assert_eq!(resp.headers()["Server"], "hospital-site");
    }

    #[tokio::test]
    async fn test_access_log_follows_config() {
        let mut state = AppState::for_tests(Store::disconnected());
        state.config.logging.access_log = true;
        state.config.logging.access_log_format = "json".to_string();
        let state = Arc::new(state);
        let resp = send(&state, get("/healthz?probe=1")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_header_on_api_when_enabled() {
        let mut state = AppState::for_tests(Store::disconnected());
        state.config.http.enable_cors = true;
        let state = Arc::new(state);
        let resp = send(&state, get("/api/events")).await;
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers()["Access-Control-Expose-Headers"], "X-Request-Id");
    }
}
