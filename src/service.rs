//! Service layer
//!
//! Hides the store-versus-bundled-data choice behind a uniform read: query
//! the store, and when the result is unacceptable (empty by default) or the
//! query fails, serve the bundled dataset instead. Store failures are
//! expected here and never reach the caller.

use std::future::Future;
use std::sync::Arc;

use crate::fallback::FallbackData;
use crate::logger;
use crate::store::{self, Event, Slide, Store, StoreError};

/// Default acceptability predicate: at least one row
pub const fn non_empty<T>(rows: &[T]) -> bool {
    !rows.is_empty()
}

/// Await `primary`; return its rows if `is_acceptable` holds, otherwise a
/// copy of `fallback`.
///
/// The primary attempt always completes before the fallback is chosen.
pub async fn fetch_with_fallback<T, Fut, P>(
    resource: &str,
    primary: Fut,
    fallback: &[T],
    is_acceptable: P,
) -> Vec<T>
where
    T: Clone,
    Fut: Future<Output = Result<Vec<T>, StoreError>>,
    P: Fn(&[T]) -> bool,
{
    match primary.await {
        Ok(rows) if is_acceptable(&rows) => rows,
        Ok(rows) => {
            logger::log_fallback(resource, &format!("store returned {} rows", rows.len()));
            fallback.to_vec()
        }
        Err(e) => {
            logger::log_fallback(resource, &e.to_string());
            fallback.to_vec()
        }
    }
}

/// Slider slides: store first, bundled slides otherwise
#[derive(Clone)]
pub struct SlideService {
    store: Arc<Store>,
    fallback: Arc<FallbackData>,
}

impl SlideService {
    pub const fn new(store: Arc<Store>, fallback: Arc<FallbackData>) -> Self {
        Self { store, fallback }
    }

    pub async fn get_all(&self) -> Vec<Slide> {
        fetch_with_fallback(
            "slider",
            store::fetch_slides(&self.store),
            &self.fallback.slides,
            non_empty,
        )
        .await
    }
}

/// Events listing: bundled data only, there is no events table
#[derive(Clone)]
pub struct EventService {
    fallback: Arc<FallbackData>,
}

impl EventService {
    pub const fn new(fallback: Arc<FallbackData>) -> Self {
        Self { fallback }
    }

    #[allow(clippy::unused_async)]
    pub async fn get_all(&self) -> Vec<Event> {
        self.fallback.events.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    fn services(store: Store) -> (SlideService, Arc<FallbackData>) {
        let fallback = Arc::new(FallbackData::load().unwrap());
        (
            SlideService::new(Arc::new(store), Arc::clone(&fallback)),
            fallback,
        )
    }

    #[tokio::test]
    async fn test_acceptable_rows_returned_unchanged() {
        let rows = fetch_with_fallback(
            "numbers",
            async { Ok::<_, StoreError>(vec![3, 1, 2]) },
            &[9],
            non_empty,
        )
        .await;
        assert_eq!(rows, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_rows_use_fallback() {
        let rows = fetch_with_fallback(
            "numbers",
            async { Ok::<_, StoreError>(Vec::new()) },
            &[9, 8],
            non_empty,
        )
        .await;
        assert_eq!(rows, vec![9, 8]);
    }

    #[tokio::test]
    async fn test_error_uses_fallback() {
        let rows = fetch_with_fallback(
            "numbers",
            async { Err::<Vec<i32>, _>(StoreError::NotConfigured) },
            &[9],
            non_empty,
        )
        .await;
        assert_eq!(rows, vec![9]);
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let at_least_two = |rows: &[i32]| rows.len() >= 2;
        let rows = fetch_with_fallback(
            "numbers",
            async { Ok::<_, StoreError>(vec![1]) },
            &[7, 7],
            at_least_two,
        )
        .await;
        assert_eq!(rows, vec![7, 7]);
    }

    #[tokio::test]
    async fn test_slides_from_store_keep_order() {
        let (service, _) = services(testing::seeded_store().await);
        let slides = service.get_all().await;
        let ids: Vec<i64> = slides.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[tokio::test]
    async fn test_empty_slider_table_serves_bundled_slides() {
        let (service, fallback) = services(testing::empty_store().await);
        assert_eq!(service.get_all().await, fallback.slides);
    }

    #[tokio::test]
    async fn test_failing_store_serves_bundled_slides() {
        let (service, fallback) = services(testing::broken_store().await);
        assert_eq!(service.get_all().await, fallback.slides);
    }

    #[tokio::test]
    async fn test_disconnected_store_serves_bundled_slides() {
        let (service, fallback) = services(Store::disconnected());
        assert_eq!(service.get_all().await, fallback.slides);
    }

    #[tokio::test]
    async fn test_events_are_bundled_dataset() {
        let fallback = Arc::new(FallbackData::load().unwrap());
        let service = EventService::new(Arc::clone(&fallback));
        assert_eq!(service.get_all().await, fallback.events);
    }
}
