//! Relational store access
//!
//! Wraps an optional sqlx `Any` pool. Postgres is the production driver;
//! SQLite is accepted as well. Without a configured URL the store is
//! disconnected and every query fails with [`StoreError::NotConfigured`].

mod models;
mod queries;

use std::time::Duration;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::config::DatabaseConfig;
use crate::logger;

pub use models::{Color, Event, Slide};
pub use queries::{fetch_colors, fetch_slides};

/// URL schemes served by the compiled-in drivers
const SUPPORTED_SCHEMES: [&str; 3] = ["postgres", "postgresql", "sqlite"];

/// Data-access failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no database configured")]
    NotConfigured,
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Handle to the relational store
pub struct Store {
    pool: Option<AnyPool>,
}

impl Store {
    /// Build a lazily connecting pool from configuration
    ///
    /// No connection is opened here; an unreachable database only shows up
    /// when a query runs.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            logger::log_warning("No database configured, serving bundled datasets only");
            return Ok(Self::disconnected());
        };

        check_scheme(url)?;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .connect_lazy(url)
            .map_err(StoreError::InvalidUrl)?;

        logger::log_info(&format!(
            "Database pool configured (max {} connections)",
            config.max_connections
        ));
        Ok(Self { pool: Some(pool) })
    }

    /// A store with no backing database
    pub const fn disconnected() -> Self {
        Self { pool: None }
    }

    /// Connect eagerly, used by tests against in-memory SQLite
    #[cfg(test)]
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        sqlx::any::install_default_drivers();
        // A single long-lived connection keeps an in-memory database alive
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;
        Ok(Self { pool: Some(pool) })
    }

    pub const fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    pub(crate) fn pool(&self) -> Result<&AnyPool, StoreError> {
        self.pool.as_ref().ok_or(StoreError::NotConfigured)
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

/// Reject URLs no enabled driver can open
///
/// `connect_lazy` only parses the URL, so a typo in the scheme would
/// otherwise surface as a failed query on every request.
fn check_scheme(url: &str) -> Result<(), StoreError> {
    let scheme = url.split_once(':').map_or("", |(scheme, _)| scheme);
    if SUPPORTED_SCHEMES
        .iter()
        .any(|supported| scheme.eq_ignore_ascii_case(supported))
    {
        return Ok(());
    }
    Err(StoreError::InvalidUrl(sqlx::Error::Configuration(
        format!("unsupported database scheme {scheme:?}").into(),
    )))
}
