//! Request handlers grouped by resource.

pub mod category;
pub mod health;
pub mod image;
pub mod product;
