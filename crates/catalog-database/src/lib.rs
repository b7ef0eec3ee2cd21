//! # catalog-database
//!
//! Storage for the catalog: repository traits, PostgreSQL connection
//! management and sqlx repositories, an in-memory store, and the provider
//! that picks one of them from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use provider::CatalogStore;
pub use repositories::{CategoryRepository, ProductRepository};
