// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::ApiErrorBody;
use crate::logger;

/// Header echoing the correlation id back to the client
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Fresh per-request correlation id
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Build JSON response
///
/// A body that fails to serialize turns into a logged 500.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    request_id: &str,
    path: &str,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_json(status, json, request_id),
        Err(e) => internal_error(request_id, path, &e),
    }
}

/// Log a handler failure and answer 500 with the structured error body
pub fn internal_error(
    request_id: &str,
    path: &str,
    error: &dyn std::error::Error,
) -> Response<Full<Bytes>> {
    logger::log_api_failure(request_id, path, error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error",
        request_id,
    )
}

/// 404 for unknown API paths
pub fn not_found(request_id: &str) -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Not Found", request_id)
}

fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    request_id: &str,
) -> Response<Full<Bytes>> {
    let body = ApiErrorBody {
        code,
        message,
        request_id,
    };
    // Plain string fields cannot fail to serialize
    let json = serde_json::to_vec(&body).unwrap_or_default();
    build_json(status, json, request_id)
}

fn build_json(status: StatusCode, json: Vec<u8>, request_id: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .header("Cache-Control", "no-store")
        .header(REQUEST_ID_HEADER, request_id)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build JSON response: {e}"));
            Response::new(Full::new(Bytes::from(r#"{"code":"INTERNAL_ERROR"}"#)))
        })
}
