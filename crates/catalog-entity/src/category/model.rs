//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A node in the category forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: i32,
    /// Category name, unique across the whole catalog.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Parent category ID (null for roots).
    pub parent_id: Option<i32>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is a root category (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Writable category fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    /// Category name.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Parent category (None for root).
    pub parent_id: Option<i32>,
}

/// A category joined with its direct product count.
///
/// One row per category, produced by a single grouped query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category ID.
    pub id: i32,
    /// Category name.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Parent category ID.
    pub parent_id: Option<i32>,
    /// Number of products whose `category_id` is exactly this category.
    pub count: i64,
}

/// Category listing entry with its direct product count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    /// The category row.
    #[serde(flatten)]
    pub category: Category,
    /// Direct product count.
    pub products_count: u64,
}
