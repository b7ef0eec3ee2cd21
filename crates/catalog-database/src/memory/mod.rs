//! Process-local catalog backend.

pub mod store;

pub use store::MemoryCatalogStore;
