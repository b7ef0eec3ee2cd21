//! Product management.

pub mod service;

pub use service::ProductService;
