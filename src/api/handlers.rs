// Resource handlers module
// One stateless handler per read-only endpoint

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{internal_error, json_response, new_request_id};
use super::types::{EventsBody, SlidesBody};
use crate::config::AppState;
use crate::logger;
use crate::store;

pub const COLORS_PATH: &str = "/api/colors";
pub const EVENTS_PATH: &str = "/api/events";
pub const SLIDER_PATH: &str = "/api/slider";

/// `GET /api/colors`: bare array of store rows
///
/// Colors have no bundled dataset, so a store failure is a 500.
pub async fn handle_colors(state: &AppState) -> Response<Full<Bytes>> {
    let request_id = new_request_id();
    match store::fetch_colors(&state.store).await {
        Ok(colors) => {
            logger::log_api_request("GET", COLORS_PATH, 200, &request_id);
            json_response(StatusCode::OK, &colors, &request_id, COLORS_PATH)
        }
        Err(e) => internal_error(&request_id, COLORS_PATH, &e),
    }
}

/// `GET /api/events`: `{"events": [...]}` from the bundled dataset
pub async fn handle_events(state: &AppState) -> Response<Full<Bytes>> {
    let request_id = new_request_id();
    let events = state.event_service().get_all().await;
    logger::log_api_request("GET", EVENTS_PATH, 200, &request_id);
    json_response(
        StatusCode::OK,
        &EventsBody { events },
        &request_id,
        EVENTS_PATH,
    )
}

/// `GET /api/slider`: `{"slides": [...]}`, store rows or bundled slides
pub async fn handle_slider(state: &AppState) -> Response<Full<Bytes>> {
    let request_id = new_request_id();
    let slides = state.slide_service().get_all().await;
    logger::log_api_request("GET", SLIDER_PATH, 200, &request_id);
    json_response(
        StatusCode::OK,
        &SlidesBody { slides },
        &request_id,
        SLIDER_PATH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::REQUEST_ID_HEADER;
    use crate::store::{testing, Store};
    use http_body_util::BodyExt;

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_colors_healthy_store() {
        let state = AppState::for_tests(testing::seeded_store().await);
        let resp = handle_colors(&state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!([
                {"id": 1, "name": "primary", "hex": "#0b5394"},
                {"id": 2, "name": "accent", "hex": "#38761d"},
            ])
        );
    }

    #[tokio::test]
    async fn test_colors_failing_store_is_500() {
        let state = AppState::for_tests(testing::broken_store().await);
        let resp = handle_colors(&state).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let request_id = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        let body = body_json(resp).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["requestId"], request_id.as_str());
        assert!(!body.to_string().contains("colors"));
    }

    #[tokio::test]
    async fn test_colors_without_database_is_500() {
        let state = AppState::for_tests(Store::disconnected());
        assert_eq!(
            handle_colors(&state).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_events_always_bundled() {
        let state = AppState::for_tests(Store::disconnected());
        let resp = handle_events(&state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body["events"],
            serde_json::to_value(&state.fallback.events).unwrap()
        );
    }

    #[tokio::test]
    async fn test_slider_from_store() {
        let state = AppState::for_tests(testing::seeded_store().await);
        let body = body_json(handle_slider(&state).await).await;
        let ids: Vec<i64> = body["slides"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[tokio::test]
    async fn test_slider_falls_back_without_error() {
        let state = AppState::for_tests(testing::broken_store().await);
        let resp = handle_slider(&state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({ "slides": serde_json::to_value(&state.fallback.slides).unwrap() })
        );
    }

    #[tokio::test]
    async fn test_each_request_gets_its_own_id() {
        let state = AppState::for_tests(Store::disconnected());
        let first = handle_events(&state).await;
        let second = handle_events(&state).await;
        assert_ne!(
            first.headers()[REQUEST_ID_HEADER],
            second.headers()[REQUEST_ID_HEADER]
        );
    }
}
