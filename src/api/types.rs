//! Response bodies of the JSON API

use serde::Serialize;

use crate::store::{Event, Slide};

/// `GET /api/events`
#[derive(Debug, Serialize)]
pub struct EventsBody {
    pub events: Vec<Event>,
}

/// `GET /api/slider`
#[derive(Debug, Serialize)]
pub struct SlidesBody {
    pub slides: Vec<Slide>,
}

/// Error body; never carries internal detail
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody<'a> {
    /// Stable machine-readable error code
    pub code: &'a str,
    /// Human-readable message, safe for clients
    pub message: &'a str,
    /// Correlation id, also logged server-side
    pub request_id: &'a str,
}
