//! Product domain entities.

pub mod model;

pub use model::{Product, ProductData};
