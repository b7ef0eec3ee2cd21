//! Category domain entities.

pub mod aggregate;
pub mod model;

pub use aggregate::CategoryAggregate;
pub use model::{Category, CategoryCount, CategoryData, CategoryWithCount};
