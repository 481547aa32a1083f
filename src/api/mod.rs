// API module entry
// Read-only JSON endpoints for the site's dynamic content

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;

pub use handlers::{COLORS_PATH, EVENTS_PATH, SLIDER_PATH};
pub use response::REQUEST_ID_HEADER;

/// Path prefix owned by this module
pub const API_PREFIX: &str = "/api/";

/// API route handler
///
/// Dispatches on the request path; the method was already checked by the router.
pub async fn handle_api(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    match path {
        COLORS_PATH => handlers::handle_colors(state).await,
        EVENTS_PATH => handlers::handle_events(state).await,
        SLIDER_PATH => handlers::handle_slider(state).await,
        _ => response::not_found(&response::new_request_id()),
    }
}
