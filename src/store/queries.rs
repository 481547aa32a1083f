//! Fixed read queries, one per resource.

use super::models::{Color, Slide};
use super::{Store, StoreError};

const COLORS_QUERY: &str = "SELECT id, name, hex FROM colors";

const SLIDES_QUERY: &str =
    "SELECT id, display_order, image, title, caption, link FROM slider ORDER BY display_order ASC";

/// All rows of the `colors` table
pub async fn fetch_colors(store: &Store) -> Result<Vec<Color>, StoreError> {
    let pool = store.pool()?;
    let rows = sqlx::query_as::<_, Color>(COLORS_QUERY)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All rows of the `slider` table, ascending by display order
pub async fn fetch_slides(store: &Store) -> Result<Vec<Slide>, StoreError> {
    let pool = store.pool()?;
    let rows = sqlx::query_as::<_, Slide>(SLIDES_QUERY)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
