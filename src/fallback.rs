//! Bundled static datasets
//!
//! JSON mirrors of the dynamic tables, compiled into the binary and parsed
//! once at startup. They are served whenever the store is empty or fails.

use crate::store::{Event, Slide};

const SLIDER_JSON: &str = include_str!("../data/slider.json");
const EVENTS_JSON: &str = include_str!("../data/events.json");

#[derive(Debug, thiserror::Error)]
#[error("failed to parse bundled {dataset} dataset: {source}")]
pub struct FallbackError {
    dataset: &'static str,
    #[source]
    source: serde_json::Error,
}

/// Immutable in-memory copy of the bundled datasets
#[derive(Debug, Clone)]
pub struct FallbackData {
    pub slides: Vec<Slide>,
    pub events: Vec<Event>,
}

impl FallbackData {
    pub fn load() -> Result<Self, FallbackError> {
        Self::parse(SLIDER_JSON, EVENTS_JSON)
    }

    fn parse(slider_json: &str, events_json: &str) -> Result<Self, FallbackError> {
        let slides = serde_json::from_str(slider_json).map_err(|source| FallbackError {
            dataset: "slider",
            source,
        })?;
        let events = serde_json::from_str(events_json).map_err(|source| FallbackError {
            dataset: "events",
            source,
        })?;
        Ok(Self { slides, events })
    }
}
