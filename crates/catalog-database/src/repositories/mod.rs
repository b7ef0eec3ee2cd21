//! Repository traits and their PostgreSQL implementations.

pub mod category;
pub mod product;
pub mod traits;

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use traits::{CategoryRepository, ProductRepository};
