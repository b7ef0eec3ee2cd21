//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product listed under exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: i32,
    /// Product name.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Owning category.
    pub category_id: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Writable product fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// Product name.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Owning category.
    pub category_id: i32,
}
