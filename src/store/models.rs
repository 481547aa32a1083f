//! Row shapes shared by the store queries and the bundled datasets.
//!
//! The bundled JSON files deserialize into the same structs the queries
//! decode into, so a fallback response is indistinguishable from a store one.

use serde::{Deserialize, Serialize};

/// A row from the `colors` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Color {
    pub id: i64,
    pub name: String,
    pub hex: String,
}

/// A row from the `slider` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slide {
    pub id: i64,
    /// Ascending sort key
    pub display_order: i64,
    /// Image reference, relative to the site root or absolute
    pub image: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// An entry of the bundled events listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    /// ISO 8601 date, e.g. `2025-03-14`
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
