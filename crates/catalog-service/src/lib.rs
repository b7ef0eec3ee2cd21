//! # catalog-service
//!
//! Business logic for the catalog admin backend. Services receive their
//! repositories as `Arc<dyn ...>` at construction time and never touch a
//! concrete backend.

pub mod category;
pub mod product;

pub use category::{CategoryService, TreeAggregator};
pub use product::ProductService;
