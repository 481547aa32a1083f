// Application state module
// Holds the loaded configuration, store handle and bundled datasets

use std::sync::Arc;

use super::types::Config;
use crate::fallback::{FallbackData, FallbackError};
use crate::service::{EventService, SlideService};
use crate::store::{Store, StoreError};

/// Errors raised while assembling the application state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),
    #[error("bundled dataset failed to load: {0}")]
    Fallback(#[from] FallbackError),
}

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<Store>,
    pub fallback: Arc<FallbackData>,
}

impl AppState {
    /// Build state from configuration: lazy store pool plus the bundled datasets
    pub fn new(config: &Config) -> Result<Self, StateError> {
        let store = Store::from_config(&config.database)?;
        let fallback = FallbackData::load()?;
        Ok(Self::with_parts(config.clone(), store, fallback))
    }

    pub fn with_parts(config: Config, store: Store, fallback: FallbackData) -> Self {
        Self {
            config,
            store: Arc::new(store),
            fallback: Arc::new(fallback),
        }
    }

    pub fn slide_service(&self) -> SlideService {
        SlideService::new(Arc::clone(&self.store), Arc::clone(&self.fallback))
    }

    pub fn event_service(&self) -> EventService {
        EventService::new(Arc::clone(&self.fallback))
    }
}

#[cfg(test)]
impl AppState {
    /// State over the given store with defaults and no environment overrides
    pub fn for_tests(store: Store) -> Self {
        let mut config = Config::load_from("does-not-exist/config").unwrap();
        config.database.url = None;
        config.site.root_path = None;
        config.logging.access_log = false;
        Self::with_parts(config, store, FallbackData::load().unwrap())
    }
}
