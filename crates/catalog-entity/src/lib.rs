//! # catalog-entity
//!
//! Domain entity models for the catalog admin backend. Every struct in this
//! crate represents a database table row or a derived value object. Database
//! rows additionally derive `sqlx::FromRow`.
//!
//! JSON field names are camelCase to match the admin UI.

pub mod category;
pub mod product;
